//! スライディングウィンドウ方式のペイロード生成器
//!
//! 末尾に余分なバイト（tail）を持つバッファを一度だけ生成し、呼び出しごとに
//! 開始位置を 1 バイトずつずらしたスライスを返す。毎回バッファ全体を作り直さずに
//! 異なる内容のペイロードが得られる。
//!
//! ```text
//! [<----------size----------><-tail->]
//! [<----------slice0-------->........]
//! [.<----------slice1-------->.......]
//! [..<----------slice2-------->......]
//! ```

use std::num::NonZeroUsize;

use bytes::Bytes;
use sha2::{Digest, Sha256};

use crate::content::ContentKind;
use crate::logging::Logger;
use crate::rng::RandomSource;

/// バッファ末尾に追加するバイト数
pub const TAIL_SIZE: usize = 1024;

#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("size should be positive, got {0}")]
    InvalidSize(i64),
}

/// gen_payload の戻り値
#[derive(Debug, Clone)]
pub struct Payload {
    pub data: Bytes,
    /// SHA-256 の小文字 hex（ハッシュ不要時は空文字列）
    pub hash: String,
}

/// バッファの状態
#[derive(Debug)]
enum Window {
    /// 未生成、または使い切って破棄済み
    Empty,
    /// 生成済み。常に `cursor + size <= buf.len()`
    Filled { buf: Bytes, cursor: usize },
}

#[derive(Debug)]
pub struct Generator {
    size: usize,
    kind: ContentKind,
    window: Window,
    rng: RandomSource,
}

impl Generator {
    /// ホスト向けコンストラクタ。
    ///
    /// `size <= 0` はエラー。未知の `kind` は `logger` に info を 1 行出して
    /// random として扱う。ログを出すのはここだけ。
    pub fn new(
        size: i64,
        kind: &str,
        rng: RandomSource,
        logger: &Logger,
    ) -> Result<Self, GeneratorError> {
        let size = usize::try_from(size)
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or(GeneratorError::InvalidSize(size))?;

        let (resolved, recognized) = ContentKind::resolve(kind);
        if !recognized {
            logger
                .with_field("payload_type", kind)
                .info(&format!("Unknown payload type '{kind}', random will be used."));
        }

        Ok(Self::with_kind(size, resolved, rng))
    }

    pub fn with_kind(size: NonZeroUsize, kind: ContentKind, rng: RandomSource) -> Self {
        Self {
            size: size.get(),
            kind,
            window: Window::Empty,
            rng,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    pub fn is_filled(&self) -> bool {
        matches!(self.window, Window::Filled { .. })
    }

    /// 次に返すスライスの開始位置（未生成なら 0）
    pub fn cursor(&self) -> usize {
        match &self.window {
            Window::Empty => 0,
            Window::Filled { cursor, .. } => *cursor,
        }
    }

    /// 現在のバッファ長（未生成なら 0）
    pub fn buffer_len(&self) -> usize {
        match &self.window {
            Window::Empty => 0,
            Window::Filled { buf, .. } => buf.len(),
        }
    }

    /// ちょうど `size` バイトのスライスを返す。
    ///
    /// 返り値は参照カウントで元バッファを共有するため、ここでバッファを
    /// 破棄しても呼び出し側のスライスは有効なまま。
    pub fn next_slice(&mut self) -> Bytes {
        let (buf, cursor) = match std::mem::replace(&mut self.window, Window::Empty) {
            Window::Filled { buf, cursor } => (buf, cursor),
            Window::Empty => (self.build(), 0),
        };

        let result = buf.slice(cursor..cursor + self.size);

        // 次の呼び出しに備えて 1 バイトずらす。tail を使い切ったら Empty のまま
        // にして、次回は最初から作り直す
        let next = cursor + 1;
        if next + self.size <= buf.len() {
            self.window = Window::Filled { buf, cursor: next };
        }

        result
    }

    pub fn gen_payload(&mut self, calc_hash: bool) -> Payload {
        let data = self.next_slice();
        let hash = if calc_hash {
            hex::encode(Sha256::digest(&data))
        } else {
            String::new()
        };
        Payload { data, hash }
    }

    fn build(&self) -> Bytes {
        Bytes::from(self.kind.build(self.size + TAIL_SIZE, &self.rng))
    }
}
