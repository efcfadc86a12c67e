use {
    crate::{data::HistoryKey, models::OhlcvTimeSeries},
    std::{collections::HashMap, sync::Arc},
};

/// Process-lifetime memo of loaded histories, keyed by query.
#[derive(Debug, Default)]
pub struct HistoryMemo {
    entries: HashMap<HistoryKey, Arc<OhlcvTimeSeries>>,
}

impl HistoryMemo {
    pub fn get(&self, key: &HistoryKey) -> Option<Arc<OhlcvTimeSeries>> {
        self.entries.get(key).cloned()
    }

    pub fn insert(&mut self, key: HistoryKey, series: OhlcvTimeSeries) -> Arc<OhlcvTimeSeries> {
        let series = Arc::new(series);
        self.entries.insert(key, series.clone());
        series
    }
}
