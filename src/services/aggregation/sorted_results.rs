// ResultAggregator - 並行挿入に対応した整列済み結果セット

use crate::core::{PipelineError, PipelineResult, RatedCar, ResultSink};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// 経年値昇順・年式降順で常に整列された結果コレクション
///
/// 挿入は1回ごとに単一のクリティカルセクションで行い、末尾から後方へ
/// 走査しながら要素を1つずつずらして空いた位置に新しい要素を置く。
/// 同じキーの要素同士は到着順を保つ。
#[derive(Debug)]
pub struct ResultAggregator {
    entries: Mutex<Vec<RatedCar>>,
    limit: usize,
}

impl ResultAggregator {
    /// 最大件数（入力レコード総数）を指定して作成
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Mutex::new(Vec::with_capacity(limit)),
            limit,
        }
    }

    /// 整列位置に挿入し、挿入後の順位を返す
    pub fn insert(&self, rated: RatedCar) -> PipelineResult<usize> {
        let mut entries = self.lock_entries()?;
        if entries.len() >= self.limit {
            return Err(PipelineError::result_overflow(self.limit));
        }

        entries.push(rated);
        let mut i = entries.len() - 1;
        while i > 0 && entries[i].ranks_before(&entries[i - 1]) {
            entries.swap(i, i - 1);
            i -= 1;
        }
        Ok(i)
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// 全ワーカー終了後に整列済みの結果を取り出す
    ///
    /// 所有権を消費するため、取り出し後の挿入は型レベルで起こり得ない。
    pub fn snapshot(self) -> PipelineResult<Vec<RatedCar>> {
        self.entries.into_inner().map_err(|_| {
            PipelineError::internal(anyhow::anyhow!("結果セットのロックが汚染されています"))
        })
    }

    fn lock_entries(&self) -> PipelineResult<MutexGuard<'_, Vec<RatedCar>>> {
        self.entries.lock().map_err(|_| {
            PipelineError::internal(anyhow::anyhow!("結果セットのロックが汚染されています"))
        })
    }
}

impl ResultSink for ResultAggregator {
    fn insert(&self, rated: RatedCar) -> PipelineResult<()> {
        ResultAggregator::insert(self, rated).map(|_| ())
    }
}
