use std::sync::Arc;

use parking_lot::Mutex;
use rulekit_builder::{
    BuilderCommand, BuilderError, BuilderMode, ExpressionBuilder, Field, FieldRegistry, TokenId,
};
use rulekit_client::{
    sync, ApiError, RuleRecord, RuleUpdate, RulesApiClient, SubmitError, VariableRecord,
};
use rulekit_core::ClientConfig;
use tracing::debug;

/// Builder shared between the workbench and the registry listeners.
pub type SharedBuilder = Arc<Mutex<ExpressionBuilder>>;

/// One editing session: a field registry, the rule and formula builders
/// subscribed to it, and the API client used to persist their output.
///
/// The registry lives as long as the workbench; dropping the workbench is the
/// only way to reset it.
pub struct Workbench {
    registry: FieldRegistry,
    rule_builder: SharedBuilder,
    formula_builder: SharedBuilder,
    client: RulesApiClient,
}

impl Workbench {
    /// Creates a workbench talking to the configured API.
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_client(RulesApiClient::with_url(config.api_url.clone()))
    }

    pub fn with_client(client: RulesApiClient) -> Self {
        let mut registry = FieldRegistry::with_static_fields();
        let rule_builder = Arc::new(Mutex::new(ExpressionBuilder::rule(registry.all())));
        let formula_builder = Arc::new(Mutex::new(ExpressionBuilder::formula(registry.all())));

        for builder in [&rule_builder, &formula_builder] {
            let subscriber = Arc::clone(builder);
            registry.subscribe(move |fields| subscriber.lock().sync_fields(fields));
        }

        Self {
            registry,
            rule_builder,
            formula_builder,
            client,
        }
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    pub fn client(&self) -> &RulesApiClient {
        &self.client
    }

    /// Adds or relabels a field; open builders pick it up immediately.
    pub fn register_field(&mut self, field: Field) -> bool {
        self.registry.register(field)
    }

    pub fn builder(&self, mode: BuilderMode) -> SharedBuilder {
        match mode {
            BuilderMode::Rule => Arc::clone(&self.rule_builder),
            BuilderMode::Formula => Arc::clone(&self.formula_builder),
        }
    }

    /// Applies a command to the builder of `mode`.
    pub fn dispatch(
        &self,
        mode: BuilderMode,
        command: BuilderCommand,
    ) -> Result<Option<TokenId>, BuilderError> {
        self.builder(mode).lock().dispatch(command)
    }

    pub fn preview(&self, mode: BuilderMode) -> String {
        self.builder(mode).lock().preview().to_string()
    }

    /// Merges the server variables into the registry. Never fails; see
    /// [`sync::fetch_dynamic_fields`].
    pub async fn refresh_fields(&mut self) -> Vec<VariableRecord> {
        sync::fetch_dynamic_fields(&self.client, &mut self.registry).await
    }

    /// Submits the rule builder. The builder is cleared only on success.
    pub async fn submit_rule(&self, weight: Option<&str>) -> Result<String, SubmitError> {
        let snapshot = self.rule_builder.lock().clone();
        let condition = sync::submit_rule(&self.client, &snapshot, weight).await?;
        self.rule_builder.lock().clear();
        Ok(condition)
    }

    /// Submits the formula builder as a new variable. The builder is cleared
    /// only on success.
    pub async fn submit_variable(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<String, SubmitError> {
        let snapshot = self.formula_builder.lock().clone();
        let formula = sync::submit_variable(&self.client, &snapshot, name, description).await?;
        self.formula_builder.lock().clear();
        Ok(formula)
    }

    pub async fn rules(&self) -> Result<Vec<RuleRecord>, ApiError> {
        self.client.list_rules().await
    }

    pub async fn variables(&self) -> Result<Vec<VariableRecord>, ApiError> {
        self.client.list_variables().await
    }

    pub async fn set_rule_weight(&self, rule_id: &str, weight: i64) -> Result<(), ApiError> {
        debug!(rule_id, weight, "updating rule weight");
        self.client
            .update_rule(rule_id, &RuleUpdate::weight(weight))
            .await
    }

    pub async fn set_rule_active(&self, rule_id: &str, active: bool) -> Result<(), ApiError> {
        debug!(rule_id, active, "toggling rule");
        self.client
            .update_rule(rule_id, &RuleUpdate::active(active))
            .await
    }

    pub async fn delete_rule(&self, rule_id: &str) -> Result<(), ApiError> {
        self.client.delete_rule(rule_id).await
    }
}
