//! Task summaries through a language model.
//!
//! A summary request sends the system prompt, the whole stored
//! transcript, and one new user message carrying the current time plus
//! the pending task list. The model reply is shown to the user and the
//! new request/response pair is appended to the transcript, which is how
//! the model can notice long-running tasks and congratulate completed
//! ones across invocations.

pub mod openai;
pub mod transcript;

use jiff::civil::DateTime;
use jiff::Zoned;

pub use openai::OpenAiClient;
pub use transcript::{ChatMessage, Transcript};

use crate::backend::Backend;
use crate::display::TaskList;
use crate::error::Result;

const SYSTEM_PROMPT: &str = "You are a helpful assistant that helps the user be on top of \
their schedule and tasks. every once in a while, the user is going to send you the current \
time and a list of currently pending tasks. your role is to tell the user in a simple \
language what they need to do today. IF AND ONLY IF a task has been ongoing for a long \
time, let the user know about it. IF AND ONLY IF you see a task that appeared earlier in \
the chat but doesn't appear anymore, add a small congratulation to acknowledge the fact \
that the task was completed. the user will send each task in a new line starting with a \
dash. words starting with a plus sign are tags related to task. when writing back to the \
user, try to mention tasks that share the same tags or concept together and be concise. \
The user added the following context: ";

/// Builds summary requests and keeps the transcript current.
pub struct Summarizer {
    client: OpenAiClient,
    transcript: Transcript,
    about_user: String,
}

impl Summarizer {
    /// Wraps a client, a transcript, and the user-context string from
    /// configuration.
    pub fn new(client: OpenAiClient, transcript: Transcript, about_user: impl Into<String>) -> Self {
        Self {
            client,
            transcript,
            about_user: about_user.into(),
        }
    }

    /// Summarizes the currently pending tasks.
    ///
    /// The transcript is only appended after a successful response, so a
    /// failed call leaves no trace in the conversation log.
    pub async fn summarize(&self, backend: &dyn Backend) -> Result<String> {
        let tasks = backend.list_tasks("").await?;
        let now = Zoned::now().datetime();
        let history = self.transcript.load()?;
        let current = current_message(now, &tasks);

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::system(format!(
            "{SYSTEM_PROMPT}{}",
            self.about_user
        )));
        messages.extend(history.iter().cloned());
        messages.push(current.clone());

        let reply = self.client.complete(&messages).await?;

        let mut updated = history;
        updated.push(current);
        updated.push(reply.clone());
        self.transcript.save(&updated)?;

        Ok(reply.content)
    }
}

/// The new user message: ISO-8601 time on the first line, then one
/// dash-prefixed line per pending task, matching what the system prompt
/// tells the model to expect.
fn current_message(now: DateTime, tasks: &TaskList) -> ChatMessage {
    let mut content = now.to_string();
    for name in tasks {
        content.push_str("\n- ");
        content.push_str(name);
    }
    ChatMessage::user(content)
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_current_message_lists_tasks_as_bullets() {
        let tasks = TaskList(vec!["Water plants".to_string(), "Renew passport".to_string()]);
        let message = current_message(date(2024, 1, 10).at(9, 0, 0, 0), &tasks);
        assert_eq!(message.role, "user");
        assert_eq!(
            message.content,
            "2024-01-10T09:00:00\n- Water plants\n- Renew passport"
        );
    }

    #[test]
    fn test_current_message_with_no_tasks_is_just_the_time() {
        let message = current_message(date(2024, 1, 10).at(9, 0, 0, 0), &TaskList(vec![]));
        assert_eq!(message.content, "2024-01-10T09:00:00");
    }

    #[test]
    fn test_system_prompt_carries_user_context() {
        let prompt = format!("{SYSTEM_PROMPT}Keeps bees.");
        assert!(prompt.ends_with("The user added the following context: Keeps bees."));
    }
}
