//! Local build -> respond -> recover pipeline

use rand::rngs::OsRng;

use blindquery_ot::{
    GroupParams, MemoryStore, QueryBatch, QueryBuilder, QueryMode, QueryResult, Recoverer,
    Responder, Result,
};
use blindquery_protocol::QueryResponse;

/// Both protocol sides over a shared in-memory store
pub struct LocalPipeline {
    params: GroupParams,
    store: MemoryStore,
    dataset_id: String,
}

impl LocalPipeline {
    pub fn new(dataset_id: &str) -> Self {
        Self::with_params(GroupParams::default(), dataset_id)
    }

    pub fn with_params(params: GroupParams, dataset_id: &str) -> Self {
        Self {
            params,
            store: MemoryStore::new(),
            dataset_id: dataset_id.to_string(),
        }
    }

    /// Insert one dataset row
    pub fn insert(&mut self, key: &str, value: &str) {
        self.store.insert(&self.dataset_id, key, value);
    }

    /// Run one full job for `ids` under `mode`
    pub fn run(&self, mode: QueryMode, ids: &[&str]) -> Result<Vec<QueryResult>> {
        let (batch, response) = self.exchange(mode, ids)?;
        Ok(self.recover(&batch, &response))
    }

    /// The raw wire exchange, for tests that inspect the response shape
    pub fn exchange(
        &self,
        mode: QueryMode,
        ids: &[&str],
    ) -> Result<(QueryBatch, QueryResponse)> {
        let ids: Vec<String> = ids.iter().map(|s| s.to_string()).collect();
        let batch = QueryBuilder::new(self.params.clone(), mode).build(&ids, &mut OsRng)?;
        let request = batch.to_request("local-job", &self.dataset_id);
        let response =
            Responder::new(self.params.clone()).respond(&self.store, &request, &mut OsRng)?;
        Ok((batch, response))
    }

    /// Requester-side recovery for a previously run exchange
    pub fn recover(&self, batch: &QueryBatch, response: &QueryResponse) -> Vec<QueryResult> {
        Recoverer::new(self.params.clone()).recover(batch, response)
    }

    pub fn params(&self) -> &GroupParams {
        &self.params
    }
}
