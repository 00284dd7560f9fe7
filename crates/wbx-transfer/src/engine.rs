//! Copy and create orchestration.

use wbx_api::{EditOptions, EditToken, Session};
use wbx_config::TransferConfig;
use wbx_core::{EntityKind, EntityRecord, IdMapping, TabularRecord};

use crate::payload::{copy_payload, tabular_payload};
use crate::report::ItemFailure;
use crate::{FailurePolicy, TransferError, TransferReport};

/// What to copy from the source.
#[derive(Debug, Clone)]
pub struct CopyRequest {
    /// Action API URL of the source knowledge base.
    pub source_url: String,
    /// Source identifiers, in the order the mapping should follow.
    pub ids: Vec<String>,
    /// Languages to carry over. Empty means all languages.
    pub languages: Vec<String>,
    pub kind: EntityKind,
    /// Property that links each new entity back to its source identifier.
    pub equiv_property: Option<String>,
}

/// Creates entities on an authenticated target, one at a time.
#[derive(Debug)]
pub struct TransferEngine<'a> {
    session: &'a Session,
    token: &'a EditToken,
    options: EditOptions,
    policy: FailurePolicy,
}

impl<'a> TransferEngine<'a> {
    #[must_use]
    pub fn new(session: &'a Session, token: &'a EditToken) -> Self {
        Self {
            session,
            token,
            options: EditOptions::default(),
            policy: FailurePolicy::default(),
        }
    }

    /// Edit options and failure policy taken from `[transfer]`.
    #[must_use]
    pub fn from_config(session: &'a Session, token: &'a EditToken, config: &TransferConfig) -> Self {
        Self::new(session, token)
            .with_options(EditOptions::from(config))
            .with_policy(FailurePolicy::from_stop_on_error(config.stop_on_error))
    }

    #[must_use]
    pub fn with_options(mut self, options: EditOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub const fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub const fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Copy `request.ids` from the source into the target.
    ///
    /// All entities are fetched with a single request and validated before
    /// the first creation, so a missing entity or a property without a
    /// datatype fails the run with nothing written.
    ///
    /// # Errors
    ///
    /// - [`TransferError::EmptyBatch`] if `request.ids` is empty.
    /// - [`TransferError::Api`] if the source fetch fails.
    /// - [`TransferError::MissingEntity`] / [`TransferError::MissingDatatype`]
    ///   from validation.
    /// - [`TransferError::Aborted`] if a creation fails under
    ///   [`FailurePolicy::StopOnError`].
    pub async fn copy_entities(&self, request: &CopyRequest) -> Result<TransferReport, TransferError> {
        if request.ids.is_empty() {
            return Err(TransferError::EmptyBatch);
        }

        tracing::info!(
            source = %request.source_url,
            count = request.ids.len(),
            kind = %request.kind,
            "fetching source entities"
        );
        let batch = self
            .session
            .client()
            .get_entities(&request.source_url, &request.ids, &request.languages)
            .await?;

        let payloads = request
            .ids
            .iter()
            .map(|id| {
                let source = batch
                    .get(id)
                    .filter(|entity| !entity.is_missing())
                    .ok_or_else(|| TransferError::MissingEntity(id.clone()))?;
                let payload = copy_payload(
                    &source.record,
                    id,
                    request.kind,
                    request.equiv_property.as_deref(),
                )?;
                Ok((id.clone(), payload))
            })
            .collect::<Result<Vec<_>, TransferError>>()?;

        self.create_all(request.kind, payloads).await
    }

    /// Create one entity per tabular row. Rows are keyed `row:<n>` (1-based)
    /// in the resulting mapping.
    ///
    /// # Errors
    ///
    /// - [`TransferError::EmptyBatch`] if `records` is empty.
    /// - [`TransferError::MissingDatatype`] if a property row has no datatype.
    /// - [`TransferError::Aborted`] if a creation fails under
    ///   [`FailurePolicy::StopOnError`].
    pub async fn create_entities(
        &self,
        records: &[TabularRecord],
        language: &str,
        kind: EntityKind,
    ) -> Result<TransferReport, TransferError> {
        if records.is_empty() {
            return Err(TransferError::EmptyBatch);
        }

        let payloads = records
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let key = format!("row:{}", index + 1);
                let payload = tabular_payload(row, &key, language, kind)?;
                Ok((key, payload))
            })
            .collect::<Result<Vec<_>, TransferError>>()?;

        self.create_all(kind, payloads).await
    }

    async fn create_all(
        &self,
        kind: EntityKind,
        payloads: Vec<(String, EntityRecord)>,
    ) -> Result<TransferReport, TransferError> {
        let mut report = TransferReport::default();

        for (source_id, payload) in payloads {
            match self
                .session
                .create_entity(self.token, kind, &payload, &self.options)
                .await
            {
                Ok(target_id) => {
                    tracing::info!(source_id = %source_id, "Created new {kind} with ID {target_id}");
                    report.mapping.push(IdMapping::new(source_id, target_id));
                }
                Err(source) => match self.policy {
                    FailurePolicy::StopOnError => {
                        return Err(TransferError::Aborted {
                            failed_id: source_id,
                            completed: report.mapping,
                            source,
                        });
                    }
                    FailurePolicy::ContinueOnError => {
                        tracing::warn!(source_id = %source_id, error = %source, "creation failed, skipping");
                        report.failures.push(ItemFailure::new(&source_id, &source));
                    }
                },
            }
        }

        Ok(report)
    }
}
