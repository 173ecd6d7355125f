use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// プロセス全体で共有する疑似乱数ソース
///
/// 起動時に一度だけシードし、以降は全ジェネレータが同じハンドルを参照する。
/// Generator ごと・呼び出しごとの再シードは行わない。
#[derive(Clone)]
pub struct RandomSource {
    inner: Arc<Mutex<StdRng>>,
}

impl RandomSource {
    /// 現在時刻（ナノ秒）でシード
    pub fn from_time() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self::seeded(nanos)
    }

    /// 固定シード（テスト用の決定的シーケンス）
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(StdRng::seed_from_u64(seed))),
        }
    }

    pub fn fill_bytes(&self, buf: &mut [u8]) {
        // StdRng::fill_bytes は失敗しない
        self.lock().fill_bytes(buf);
    }

    /// ロックを保持したまま RNG を直接使う
    pub fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        f(&mut self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, StdRng> {
        // RNG の状態は panic で壊れないので poison は無視する
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::from_time()
    }
}

impl std::fmt::Debug for RandomSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomSource").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn same_seed_same_sequence() {
        let a = RandomSource::seeded(7);
        let b = RandomSource::seeded(7);
        let mut x = [0u8; 64];
        let mut y = [0u8; 64];
        a.fill_bytes(&mut x);
        b.fill_bytes(&mut y);
        assert_eq!(x, y);
    }

    #[test]
    fn clones_share_state() {
        let a = RandomSource::seeded(7);
        let b = a.clone();
        let mut x = [0u8; 32];
        let mut y = [0u8; 32];
        a.fill_bytes(&mut x);
        b.fill_bytes(&mut y);
        // 同じストリームから連続して引くので一致しない
        assert_ne!(x, y);
    }

    #[test]
    fn with_rng_draws_from_shared_stream() {
        let src = RandomSource::seeded(1);
        let n: u32 = src.with_rng(|rng| rng.gen_range(0..10));
        assert!(n < 10);
    }

    #[test]
    fn fill_empty_buffer() {
        let src = RandomSource::seeded(1);
        let mut buf = [0u8; 0];
        src.fill_bytes(&mut buf);
    }
}
