// BoundedQueue - 固定容量のブロッキングFIFOバッファ
//
// リングバッファ本体はMutexで保護し、「空きあり」「データあり」の2条件を
// カウンティングセマフォの組で表現する。待機者はFIFO順に起こされる。

use crate::core::{PipelineError, PipelineResult};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::Semaphore;

/// 固定長の循環バッファ
///
/// `head` は次の書き込み位置、`tail` は次の読み出し位置。
/// 常に `0 <= count <= slots.len()` かつ両インデックスは `[0, capacity)` に収まる。
#[derive(Debug)]
struct Ring<T> {
    slots: Vec<Option<T>>,
    head: usize,
    tail: usize,
    count: usize,
}

impl<T> Ring<T> {
    fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots,
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn push(&mut self, item: T) -> Result<(), T> {
        if self.count == self.capacity() {
            return Err(item);
        }
        debug_assert!(self.slots[self.head].is_none());
        self.slots[self.head] = Some(item);
        self.head = (self.head + 1) % self.capacity();
        self.count += 1;
        Ok(())
    }

    fn pop(&mut self) -> Option<T> {
        if self.count == 0 {
            return None;
        }
        let item = self.slots[self.tail].take();
        self.tail = (self.tail + 1) % self.capacity();
        self.count -= 1;
        item
    }
}

/// 複数プロデューサー・複数コンシューマー対応の有界キュー
#[derive(Debug)]
pub struct BoundedQueue<T> {
    ring: Mutex<Ring<T>>,
    /// 空きスロット数
    space: Semaphore,
    /// 取り出し可能な要素数
    items: Semaphore,
    capacity: usize,
}

impl<T> BoundedQueue<T> {
    /// 容量を指定してキューを作成
    ///
    /// 容量0は起動前の設定エラーとして拒否する。
    pub fn new(capacity: usize) -> PipelineResult<Self> {
        if capacity == 0 {
            return Err(PipelineError::configuration(
                "buffer_capacity",
                "キュー容量は1以上である必要があります",
            ));
        }

        Ok(Self {
            ring: Mutex::new(Ring::with_capacity(capacity)),
            space: Semaphore::new(capacity),
            items: Semaphore::new(0),
            capacity,
        })
    }

    /// 要素を末尾に追加する
    ///
    /// 満杯の間は空きができるまで待機し、格納後に待機中のコンシューマーを1つ起こす。
    pub async fn enqueue(&self, item: T) -> PipelineResult<()> {
        let permit = self
            .space
            .acquire()
            .await
            .map_err(|_| PipelineError::queue_closed("enqueue"))?;
        permit.forget();

        let len = {
            let mut ring = self.lock_ring()?;
            if ring.push(item).is_err() {
                return Err(PipelineError::internal(anyhow::anyhow!(
                    "空きスロットの許可を得たのにリングが満杯です"
                )));
            }
            ring.count
        };
        tracing::trace!(len, capacity = self.capacity, "enqueue");

        self.items.add_permits(1);
        Ok(())
    }

    /// 先頭の要素を取り出す
    ///
    /// 空の間はデータが届くまで待機し、取り出し後に待機中のプロデューサーを1つ起こす。
    pub async fn dequeue(&self) -> PipelineResult<T> {
        let permit = self
            .items
            .acquire()
            .await
            .map_err(|_| PipelineError::queue_closed("dequeue"))?;
        permit.forget();

        let (item, len) = {
            let mut ring = self.lock_ring()?;
            let item = ring.pop().ok_or_else(|| {
                PipelineError::internal(anyhow::anyhow!(
                    "データの許可を得たのにリングが空です"
                ))
            })?;
            (item, ring.count)
        };
        tracing::trace!(len, capacity = self.capacity, "dequeue");

        self.space.add_permits(1);
        Ok(item)
    }

    /// キューを恒久的に閉じる
    ///
    /// 待機中および以後の `enqueue` / `dequeue` は `QueueClosed` で失敗する。
    pub fn close(&self) {
        self.space.close();
        self.items.close();
    }

    pub fn is_closed(&self) -> bool {
        self.items.is_closed()
    }

    /// 残っている要素を待機せずに全て取り出す
    pub fn drain(&self) -> PipelineResult<Vec<T>> {
        let mut drained = Vec::new();
        while let Ok(permit) = self.items.try_acquire() {
            permit.forget();
            match self.lock_ring()?.pop() {
                Some(item) => drained.push(item),
                None => break,
            }
            self.space.add_permits(1);
        }
        Ok(drained)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 現在格納されている要素数
    /// 現在の要素数（ロックが汚染されていても件数自体は読める）
    pub fn len(&self) -> usize {
        self.ring
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock_ring(&self) -> PipelineResult<MutexGuard<'_, Ring<T>>> {
        self.ring.lock().map_err(|_| {
            PipelineError::internal(anyhow::anyhow!("キューのロックが汚染されています"))
        })
    }
}
