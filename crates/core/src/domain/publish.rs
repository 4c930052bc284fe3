use serde::{Deserialize, Serialize};

use super::task::TaskRequest;

/// Where a run's output ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishResult {
    pub repo_url: String,
    pub pages_url: String,
    pub commit_sha: String,
}

/// Record reported to the evaluator once a run has published.
///
/// The evaluation URL travels with the payload so the notifier has a single
/// input, but it is never part of the transmitted body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationPayload {
    pub email: String,
    pub task: String,
    pub round: u32,
    pub nonce: String,
    pub repo_url: String,
    pub commit_sha: String,
    pub pages_url: String,
    #[serde(skip_serializing, default)]
    evaluation_url: String,
}

impl NotificationPayload {
    pub fn new(task: &TaskRequest, publish: &PublishResult) -> Self {
        Self {
            email: task.email.clone(),
            task: task.task.clone(),
            round: task.round,
            nonce: task.nonce.clone(),
            repo_url: publish.repo_url.clone(),
            commit_sha: publish.commit_sha.clone(),
            pages_url: publish.pages_url.clone(),
            evaluation_url: task.evaluation_url.clone(),
        }
    }

    pub fn evaluation_url(&self) -> &str {
        &self.evaluation_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NotificationPayload {
        let task = TaskRequest {
            email: "student@example.com".to_string(),
            secret: "s3cret".to_string(),
            task: "todo".to_string(),
            round: 1,
            nonce: "abc".to_string(),
            brief: "todo app".to_string(),
            evaluation_url: "https://eval.example.com/notify".to_string(),
            attachments: Vec::new(),
        };
        let publish = PublishResult {
            repo_url: "https://github.com/me/tds-proj-todo".to_string(),
            pages_url: "https://me.github.io/tds-proj-todo/".to_string(),
            commit_sha: "deadbeef".to_string(),
        };
        NotificationPayload::new(&task, &publish)
    }

    #[test]
    fn test_payload_keeps_evaluation_url() {
        assert_eq!(sample().evaluation_url(), "https://eval.example.com/notify");
    }

    #[test]
    fn test_serialized_payload_omits_evaluation_url() {
        let json = serde_json::to_value(sample()).unwrap();
        let obj = json.as_object().unwrap();

        assert!(!obj.contains_key("evaluation_url"));
        assert!(!obj.contains_key("secret"));
        assert_eq!(obj.len(), 7);
        assert_eq!(json["commit_sha"], "deadbeef");
        assert_eq!(json["round"], 1);
    }
}
