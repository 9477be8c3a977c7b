use crate::{parse_policy_csv, AuthzResult};
use casbin::{CoreApi, DefaultModel, Enforcer, FileAdapter, MemoryAdapter, MgmtApi};
use std::path::PathBuf;

const MODEL: &str = include_str!("../assets/rbac_model.conf");
const DEFAULT_POLICY: &str = include_str!("../assets/rbac_policy.csv");

/// Where the enforcer loads its model and rules from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PolicySource {
    /// Embedded model plus the demo policy, held in a memory adapter.
    #[default]
    Embedded,
    /// Model file plus a Casbin CSV policy file behind the file adapter.
    Files { model: PathBuf, policy: PathBuf },
}

pub fn rbac_model_string() -> &'static str {
    MODEL
}

pub fn default_policy_string() -> &'static str {
    DEFAULT_POLICY
}

pub async fn rbac_model() -> AuthzResult<DefaultModel> {
    Ok(DefaultModel::from_str(MODEL).await?)
}

/// Build a Casbin enforcer for the given source.
///
/// # Errors
/// - `Io` when the model or policy file cannot be read.
/// - Casbin errors for an invalid model or malformed policy file.
/// - `InvalidRule` when the embedded policy cannot be parsed.
pub async fn build_enforcer(source: &PolicySource) -> AuthzResult<Enforcer> {
    match source {
        PolicySource::Embedded => {
            let model = rbac_model().await?;
            let mut enforcer = Enforcer::new(model, MemoryAdapter::default()).await?;
            let (policies, groupings) = parse_policy_csv(DEFAULT_POLICY)?;
            for policy in &policies {
                enforcer.add_policy(policy.to_params()).await?;
            }
            for grouping in &groupings {
                enforcer.add_grouping_policy(grouping.to_params()).await?;
            }
            // Role links must be rebuilt once every grouping is in place.
            enforcer.build_role_links()?;
            tracing::debug!(
                policies = policies.len(),
                groupings = groupings.len(),
                "loaded embedded rbac policy"
            );
            Ok(enforcer)
        }
        PolicySource::Files { model, policy } => {
            // Unreadable paths surface as `Io` before Casbin sees them.
            let model_text = std::fs::read_to_string(model)?;
            std::fs::metadata(policy)?;
            let model = DefaultModel::from_str(&model_text).await?;
            let adapter = FileAdapter::new(policy.clone());
            let enforcer = Enforcer::new(model, adapter).await?;
            tracing::debug!(policy = %policy.display(), "loaded rbac policy file");
            Ok(enforcer)
        }
    }
}
