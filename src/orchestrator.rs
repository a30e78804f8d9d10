//! Question pipeline orchestration.
//!
//! One question at a time moves through: conversational short-circuit,
//! classification, local catalog answering, and finally the
//! retrieval-augmented streaming path with bounded retry. The orchestrator
//! owns the active cancellation token (via the session slot) and is the only
//! component that writes to the output sink.

use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, error, info, info_span, warn};
use uuid::Uuid;

use crate::catalog;
use crate::classify::{self, QuestionCategory};
use crate::config::{AssistantConfig, INITIAL_BACKOFF_MS, MAX_RETRIES};
use crate::connector::{CompletionReason, LlmConnector};
use crate::context::ContextSource;
use crate::conversation;
use crate::errors::AssistantError;
use crate::events::{ChatEvent, OutputSink};
use crate::session::SessionSlot;

const BUSY_MESSAGE: &str =
    "I'm still working on the previous question. Please wait a moment, or stop it first.";
const PAUSED_MESSAGE: &str = "Okay, I've paused that answer.";

/// How a single streaming attempt ended.
enum AttemptOutcome {
    /// The stream completed; carries the reported finish reason, if any.
    Finished(Option<CompletionReason>),
    /// The user cancelled mid-stream.
    Cancelled,
}

/// Drives questions through the answer pipeline.
pub struct Orchestrator {
    config: AssistantConfig,
    connector: Arc<dyn LlmConnector>,
    context: Arc<dyn ContextSource>,
    sink: Arc<dyn OutputSink>,
    slot: Arc<SessionSlot>,
}

impl Orchestrator {
    /// Build the pipeline and report readiness to the sink: `connected` is
    /// true when the settings pass validation, false otherwise (local
    /// answering still works either way).
    pub fn new(
        config: AssistantConfig,
        connector: Arc<dyn LlmConnector>,
        context: Arc<dyn ContextSource>,
        sink: Arc<dyn OutputSink>,
    ) -> Self {
        let orchestrator = Self {
            config,
            connector,
            context,
            sink,
            slot: Arc::new(SessionSlot::new()),
        };
        let status = match orchestrator.config.validate() {
            Ok(()) => ChatEvent::Status {
                connected: true,
                message: "Ready to answer questions about ARCAD products.".to_string(),
            },
            Err(err) => ChatEvent::Status {
                connected: false,
                message: err.user_message(),
            },
        };
        orchestrator.emit(&status);
        orchestrator
    }

    /// Process one question. Returns `Ok(false)` when another question is
    /// already in flight (the rejection notice goes to the sink); `Ok(true)`
    /// when the question ran to completion, cancellation included.
    pub async fn submit_question(&self, question: &str) -> Result<bool, AssistantError> {
        let Some(guard) = self.slot.acquire() else {
            warn!("question rejected, another is in flight");
            self.emit(&ChatEvent::Notice {
                message: BUSY_MESSAGE.to_string(),
            });
            return Ok(false);
        };

        let request_id = Uuid::new_v4();
        let span = info_span!("question", %request_id);
        let result = self
            .handle_question(question, guard.token())
            .instrument(span)
            .await;
        drop(guard);
        result.map(|()| true)
    }

    /// Cancel the in-flight question, if any. Safe when idle.
    pub fn cancel_active(&self) {
        info!("cancellation requested");
        self.slot.cancel_active();
    }

    /// Whether a question is currently being processed.
    pub fn is_processing(&self) -> bool {
        self.slot.is_processing()
    }

    /// Reset the conversation view.
    pub fn clear_chat(&self) {
        self.emit(&ChatEvent::ChatCleared);
    }

    async fn handle_question(
        &self,
        question: &str,
        token: &CancellationToken,
    ) -> Result<(), AssistantError> {
        let small_talk = conversation::check_conversational(question);
        if small_talk.is_conversational {
            debug!("answered conversationally");
            self.answer_locally(small_talk.response.unwrap_or_default());
            return Ok(());
        }

        let category = classify::classify(question);
        debug!(?category, "question classified");

        if let QuestionCategory::Language { language } = category {
            let rewritten = format!(
                "The user is interested in ARCAD Software for a {} audience. Answer their \
                 question with the localized site in mind and point them to localized \
                 resources where relevant. Original question: {question}",
                language.name
            );
            return self.stream_with_retry(&rewritten, language.url, token).await;
        }

        if let Some(answer) = catalog::answer_catalog_query(question) {
            debug!("answered from the local catalog");
            self.answer_locally(answer);
            return Ok(());
        }

        let context_url = match category {
            QuestionCategory::ProductSpecific { product } => product.url,
            _ => self.config.default_context_url.as_str(),
        };
        self.stream_with_retry(question, context_url, token).await
    }

    /// Emit a locally produced answer with the same bracketing as a
    /// streamed one.
    fn answer_locally(&self, text: String) {
        self.emit(&ChatEvent::AnswerStarted);
        self.emit(&ChatEvent::AnswerChunk { text });
        self.emit(&ChatEvent::AnswerStopped);
    }

    /// The retrieval-augmented path. `answerStarted` precedes the first
    /// attempt and `answerStopped` fires exactly once afterwards, whatever
    /// the outcome; only configuration validation can skip the bracketing.
    async fn stream_with_retry(
        &self,
        question: &str,
        url: &str,
        token: &CancellationToken,
    ) -> Result<(), AssistantError> {
        if let Err(err) = self.config.validate() {
            error!(error = %err, "streaming path blocked by configuration");
            self.emit(&ChatEvent::Error {
                message: err.user_message(),
            });
            return Err(err);
        }

        self.emit(&ChatEvent::AnswerStarted);
        let outcome = self.run_attempts(question, url, token).await;
        self.emit(&ChatEvent::AnswerStopped);

        match outcome {
            Ok(()) => Ok(()),
            Err(err) => {
                error!(error = %err, "question failed");
                self.emit(&ChatEvent::Error {
                    message: err.user_message(),
                });
                Err(err)
            }
        }
    }

    /// Bounded retry loop. Only overload errors are retried; the backoff
    /// before attempt `n + 1` is `INITIAL_BACKOFF_MS * 2^(n - 1)` and is
    /// raced against the cancellation token. Cancellation ends the loop
    /// with a neutral pause notice, never an error.
    async fn run_attempts(
        &self,
        question: &str,
        url: &str,
        token: &CancellationToken,
    ) -> Result<(), AssistantError> {
        for attempt in 1..=MAX_RETRIES {
            if token.is_cancelled() {
                self.emit_paused();
                return Ok(());
            }

            match self.attempt_once(question, url, token, attempt).await {
                Ok(AttemptOutcome::Finished(finish)) => {
                    let reason =
                        finish.unwrap_or_else(|| CompletionReason::Other("missing".to_string()));
                    if !reason.is_normal() {
                        warn!(%reason, "answer ended abnormally");
                        self.emit(&ChatEvent::Notice {
                            message: format!(
                                "The answer may be incomplete; the model stopped early \
                                 ({reason})."
                            ),
                        });
                    }
                    return Ok(());
                }
                Ok(AttemptOutcome::Cancelled) | Err(AssistantError::Cancelled) => {
                    self.emit_paused();
                    return Ok(());
                }
                Err(err) if err.is_overloaded() && attempt < MAX_RETRIES => {
                    let backoff_ms = INITIAL_BACKOFF_MS * 2u64.pow(attempt - 1);
                    warn!(attempt, backoff_ms, "model overloaded, retrying");
                    self.emit(&ChatEvent::RetryScheduled { attempt, backoff_ms });
                    tokio::select! {
                        biased;
                        _ = token.cancelled() => {
                            self.emit_paused();
                            return Ok(());
                        }
                        _ = tokio::time::sleep(Duration::from_millis(backoff_ms)) => {}
                    }
                }
                Err(err) => return Err(err),
            }
        }
        Err(AssistantError::Overloaded(
            "the model stayed overloaded after repeated attempts".to_string(),
        ))
    }

    /// One attempt: resolve context, open the stream, forward fragments in
    /// arrival order. The token is observed at every fragment boundary;
    /// returning drops the stream and with it the network connection.
    /// Context is re-resolved per attempt, so the fallback notice fires on
    /// the first attempt only instead of repeating across retries.
    async fn attempt_once(
        &self,
        question: &str,
        url: &str,
        token: &CancellationToken,
        attempt: u32,
    ) -> Result<AttemptOutcome, AssistantError> {
        let context = self.context.get_context(url, token).await?;
        if context.used_fallback && attempt == 1 {
            self.emit(&ChatEvent::Notice {
                message: format!(
                    "The page didn't have much readable content, so I'm answering from {} \
                     instead.",
                    context.source_url
                ),
            });
        }

        let mut stream = self
            .connector
            .stream_answer(question, &context.text, &context.source_url)
            .await?;

        let mut finish = None;
        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => return Ok(AttemptOutcome::Cancelled),
                item = stream.next() => match item {
                    Some(Ok(chunk)) => {
                        if !chunk.text.is_empty() {
                            self.emit(&ChatEvent::AnswerChunk { text: chunk.text });
                        }
                        if let Some(reason) = chunk.finish {
                            finish = Some(reason);
                        }
                    }
                    Some(Err(err)) => return Err(err),
                    None => return Ok(AttemptOutcome::Finished(finish)),
                },
            }
        }
    }

    fn emit_paused(&self) {
        info!("answer paused by the user");
        self.emit(&ChatEvent::Notice {
            message: PAUSED_MESSAGE.to_string(),
        });
    }

    /// Sink failures are logged, never propagated: a broken output target
    /// must not leave the session slot busy or the pipeline wedged.
    fn emit(&self, event: &ChatEvent) {
        if let Err(err) = self.sink.handle(event) {
            error!(error = %err, "output sink failure");
        }
    }
}
