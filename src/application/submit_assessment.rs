//! SubmitAssessmentHandler - sends the finished wizard to the risk backend.
//!
//! 1. Check every question is complete and build the payload
//! 2. Lock the wizard (analyzing) and start the progress ticker
//! 3. Create the assessment, read its slug
//! 4. Move to personalizing and personalize that slug
//! 5. Complete the bar and report the redirect path
//!
//! Any request failure shows an error toast, cancels the bar and hands the
//! wizard back for editing on its last question.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;
use tracing::Instrument;

use super::progress_ticker::ProgressTicker;
use super::wizard_session::{WizardError, WizardSession};
use crate::config::ProgressConfig;
use crate::domain::foundation::{
    AssessmentSlug, AuthContext, DomainError, ErrorCode, Percentage, SubmissionId,
};
use crate::domain::questionnaire::QuestionId;
use crate::domain::submission::{build_payload, PayloadError, ProgressPhase};
use crate::ports::{ApiError, AssessmentApi, Notifier, Toast};

/// Where the caller should send the user after a successful submission.
pub fn redirect_path(slug: &AssessmentSlug) -> String {
    format!("/dashboard/assessments/{}", slug)
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionOutcome {
    pub submission_id: SubmissionId,
    pub slug: AssessmentSlug,
    pub redirect_path: String,
}

/// Errors from submitting the wizard.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    /// A question still blocks submission; nothing was sent.
    #[error("question '{0}' is not complete")]
    Incomplete(QuestionId),

    /// The answers could not be turned into a request; nothing was sent.
    #[error(transparent)]
    Payload(#[from] PayloadError),

    /// The wizard was not in a state that allows submitting.
    #[error(transparent)]
    Wizard(#[from] WizardError),

    /// Creating the assessment failed.
    #[error("risk analysis failed: {0}")]
    Analysis(ApiError),

    /// Personalizing the created assessment failed.
    #[error("personalization of {slug} failed: {source}")]
    Personalization {
        slug: AssessmentSlug,
        source: ApiError,
    },
}

impl SubmitError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SubmitError::Incomplete(_) => ErrorCode::IncompleteAnswers,
            SubmitError::Payload(_) => ErrorCode::InvalidFormat,
            SubmitError::Wizard(err) => err.code(),
            SubmitError::Analysis(err) | SubmitError::Personalization { source: err, .. } => {
                match err {
                    ApiError::Unauthorized(_) => ErrorCode::Unauthorized,
                    _ => ErrorCode::ApiError,
                }
            }
        }
    }

    /// The backend error, if a request failed.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            SubmitError::Analysis(err) | SubmitError::Personalization { source: err, .. } => {
                Some(err)
            }
            _ => None,
        }
    }

    /// Toast text for the user.
    pub fn user_message(&self) -> &'static str {
        match self.api_error() {
            Some(ApiError::Unauthorized(_)) => "Sesi Anda telah berakhir. Silakan masuk kembali.",
            Some(_) if matches!(self, SubmitError::Analysis(_)) => {
                "Gagal menganalisis risiko. Silakan coba lagi."
            }
            Some(_) => "Gagal menyusun program personal. Silakan coba lagi.",
            None => "Lengkapi semua pertanyaan sebelum mengirim.",
        }
    }
}

impl From<SubmitError> for DomainError {
    fn from(err: SubmitError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}

/// Handler for submitting a completed wizard.
pub struct SubmitAssessmentHandler {
    api: Arc<dyn AssessmentApi>,
    notifier: Arc<dyn Notifier>,
    progress_config: ProgressConfig,
    progress: Arc<watch::Sender<Percentage>>,
}

impl SubmitAssessmentHandler {
    pub fn new(
        api: Arc<dyn AssessmentApi>,
        notifier: Arc<dyn Notifier>,
        progress_config: ProgressConfig,
    ) -> Self {
        let (progress, _) = watch::channel(Percentage::ZERO);
        Self {
            api,
            notifier,
            progress_config,
            progress: Arc::new(progress),
        }
    }

    /// Live value of the submission progress bar.
    pub fn progress(&self) -> watch::Receiver<Percentage> {
        self.progress.subscribe()
    }

    pub async fn handle(
        &self,
        session: &mut WizardSession,
        auth: &AuthContext,
    ) -> Result<SubmissionOutcome, SubmitError> {
        // 1. Gate on completion, build the request before locking anything
        if let Some(index) = session.first_incomplete() {
            return Err(SubmitError::Incomplete(session.questions()[index].id()));
        }
        let payload = build_payload(session.answers())?;

        // 2. Lock the wizard
        session.begin_submission()?;
        let submission_id = SubmissionId::new();
        let span = tracing::info_span!("submit_assessment", submission_id = %submission_id);

        async move {
            let ticker = ProgressTicker::start(&self.progress_config, Arc::clone(&self.progress));
            tracing::info!("Analyzing risk");

            // 3. Create
            let slug = match self
                .api
                .create_assessment(auth, &payload, &submission_id)
                .await
            {
                Ok(slug) => slug,
                Err(err) => {
                    return Err(self.fail(session, ticker, SubmitError::Analysis(err)).await);
                }
            };

            // 4. Personalize
            session.mark_personalizing()?;
            ticker.enter(ProgressPhase::Personalization);
            tracing::info!(slug = %slug, "Personalizing assessment");

            if let Err(source) = self
                .api
                .personalize_assessment(auth, &slug, &submission_id)
                .await
            {
                let err = SubmitError::Personalization { slug, source };
                return Err(self.fail(session, ticker, err).await);
            }

            // 5. Done
            ticker.finish().await;
            session.mark_succeeded()?;
            tracing::info!(slug = %slug, "Assessment ready");
            self.notifier
                .notify(Toast::success("Analisis risiko selesai."));

            Ok::<_, SubmitError>(SubmissionOutcome {
                submission_id,
                redirect_path: redirect_path(&slug),
                slug,
            })
        }
        .instrument(span)
        .await
    }

    async fn fail(
        &self,
        session: &mut WizardSession,
        ticker: ProgressTicker,
        err: SubmitError,
    ) -> SubmitError {
        ticker.cancel().await;
        session.abort_submission();
        tracing::warn!(error = %err, code = %err.code(), "Submission failed");
        self.notifier.notify(Toast::error(err.user_message()));
        err
    }
}
