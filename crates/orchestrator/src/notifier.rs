use deployer_core::NotificationPayload;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{error, info, warn};

/// Attempt timeout plus the pause taken after each failed attempt.
///
/// The number of delays is the number of attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempt_timeout: Duration,
    pub delays: Vec<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempt_timeout: Duration::from_secs(20),
            delays: [1, 2, 4, 8].into_iter().map(Duration::from_secs).collect(),
        }
    }
}

impl RetryPolicy {
    pub fn with_timeout_secs(secs: u64) -> Self {
        Self {
            attempt_timeout: Duration::from_secs(secs),
            ..Self::default()
        }
    }

    pub fn max_attempts(&self) -> usize {
        self.delays.len()
    }
}

/// Delivers a run's result to the evaluator.
#[derive(Debug, Clone)]
pub struct Notifier {
    client: Client,
    policy: RetryPolicy,
}

impl Notifier {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            client: Client::new(),
            policy,
        }
    }

    /// Returns `true` once the evaluator answers `200`. Never fails the run.
    pub async fn notify(&self, payload: &NotificationPayload) -> bool {
        let url = payload.evaluation_url();
        let attempts = self.policy.max_attempts();

        for (index, delay) in self.policy.delays.iter().enumerate() {
            let attempt = index + 1;
            let response = self
                .client
                .post(url)
                .json(payload)
                .timeout(self.policy.attempt_timeout)
                .send()
                .await;

            match response {
                Ok(resp) if resp.status() == StatusCode::OK => {
                    info!(attempt, "Evaluator notified");
                    return true;
                }
                Ok(resp) => {
                    warn!(attempt, attempts, status = %resp.status(), "Evaluator rejected notification");
                }
                Err(e) => {
                    warn!(attempt, attempts, error = %e, "Notification request failed");
                }
            }

            tokio::time::sleep(*delay).await;
        }

        error!(attempts, url = %url, "Giving up on evaluator notification");
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deployer_core::{PublishResult, TaskRequest};
    use std::sync::{Arc, Mutex};
    use std::time::Instant;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

    /// Answers 500 and records when each attempt arrived.
    #[derive(Clone, Default)]
    struct ArrivalLog {
        arrivals: Arc<Mutex<Vec<Instant>>>,
    }

    impl Respond for ArrivalLog {
        fn respond(&self, _request: &Request) -> ResponseTemplate {
            self.arrivals.lock().unwrap().push(Instant::now());
            ResponseTemplate::new(500)
        }
    }

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            attempt_timeout: Duration::from_millis(500),
            delays: vec![Duration::from_millis(5); 4],
        }
    }

    fn payload(evaluation_url: String) -> NotificationPayload {
        let task = TaskRequest {
            email: "a@b.c".to_string(),
            secret: "s".to_string(),
            task: "todo".to_string(),
            round: 1,
            nonce: "n-1".to_string(),
            brief: "todo app".to_string(),
            evaluation_url,
            attachments: Vec::new(),
        };
        let publish = PublishResult {
            repo_url: "https://github.com/octo/tds-proj-todo".to_string(),
            pages_url: "https://octo.github.io/tds-proj-todo/".to_string(),
            commit_sha: "abc123".to_string(),
        };
        NotificationPayload::new(&task, &publish)
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), 4);
        assert_eq!(policy.attempt_timeout, Duration::from_secs(20));
        assert_eq!(
            policy.delays,
            vec![
                Duration::from_secs(1),
                Duration::from_secs(2),
                Duration::from_secs(4),
                Duration::from_secs(8)
            ]
        );
        assert_eq!(
            RetryPolicy::with_timeout_secs(5).attempt_timeout,
            Duration::from_secs(5)
        );
    }

    #[tokio::test]
    async fn test_first_success_stops_retrying() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/notify"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let notifier = Notifier::new(fast_policy());
        assert!(notifier.notify(&payload(format!("{}/notify", server.uri()))).await);
    }

    #[tokio::test]
    async fn test_retries_until_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(2)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let notifier = Notifier::new(fast_policy());
        assert!(notifier.notify(&payload(format!("{}/notify", server.uri()))).await);
        assert_eq!(server.received_requests().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_four_attempts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let notifier = Notifier::new(fast_policy());
        assert!(!notifier.notify(&payload(format!("{}/notify", server.uri()))).await);
        assert_eq!(server.received_requests().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_backoff_waits_grow_between_attempts() {
        let server = MockServer::start().await;
        let log = ArrivalLog::default();
        Mock::given(method("POST"))
            .respond_with(log.clone())
            .mount(&server)
            .await;

        let delays: Vec<Duration> = [40, 80, 160, 320]
            .into_iter()
            .map(Duration::from_millis)
            .collect();
        let notifier = Notifier::new(RetryPolicy {
            attempt_timeout: Duration::from_secs(2),
            delays: delays.clone(),
        });

        let started = Instant::now();
        assert!(!notifier.notify(&payload(format!("{}/notify", server.uri()))).await);
        let elapsed = started.elapsed();

        let arrivals = log.arrivals.lock().unwrap().clone();
        assert_eq!(arrivals.len(), 4);

        let gaps: Vec<Duration> = arrivals.windows(2).map(|w| w[1] - w[0]).collect();
        for (gap, delay) in gaps.iter().zip(&delays) {
            assert!(*gap >= *delay, "gap {:?} shorter than delay {:?}", gap, delay);
        }
        assert!(gaps[0] < gaps[1] && gaps[1] < gaps[2], "gaps not increasing: {:?}", gaps);

        // The last delay is still taken after the final failed attempt.
        let total: Duration = delays.iter().sum();
        assert!(elapsed >= total, "elapsed {:?} shorter than {:?}", elapsed, total);
    }

    #[tokio::test]
    async fn test_only_200_counts_as_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        let notifier = Notifier::new(fast_policy());
        assert!(!notifier.notify(&payload(format!("{}/notify", server.uri()))).await);
    }

    #[tokio::test]
    async fn test_slow_evaluator_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let policy = RetryPolicy {
            attempt_timeout: Duration::from_millis(50),
            delays: vec![Duration::from_millis(1); 2],
        };
        let notifier = Notifier::new(policy);
        assert!(!notifier.notify(&payload(format!("{}/notify", server.uri()))).await);
    }

    #[tokio::test]
    async fn test_body_excludes_evaluation_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let notifier = Notifier::new(fast_policy());
        notifier
            .notify(&payload(format!("{}/notify", server.uri())))
            .await;

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert!(body.get("evaluation_url").is_none());
        assert_eq!(body["nonce"], "n-1");
        assert_eq!(body["commit_sha"], "abc123");
        assert_eq!(body["round"], 1);
    }
}
