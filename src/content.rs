use std::fmt;
use std::str::FromStr;

use crate::lorem::LoremIpsum;
use crate::rng::RandomSource;

/// ペイロードの内容種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentKind {
    /// Lorem ipsum 風の段落を改行区切りで連結
    Text,
    /// 疑似乱数バイト列
    Random,
    /// 未指定（Random と同じ扱い）
    #[default]
    Unspecified,
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(ContentKind::Text),
            "random" => Ok(ContentKind::Random),
            "" => Ok(ContentKind::Unspecified),
            _ => Err(format!("Unknown payload type: {}", s)),
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentKind::Text => write!(f, "text"),
            // 実際に使われる戦略名で表示する
            ContentKind::Random | ContentKind::Unspecified => write!(f, "random"),
        }
    }
}

impl ContentKind {
    /// 文字列を種別に解決する。未知の値は Unspecified にフォールバックし、
    /// 2 番目の値で認識できたかどうかを返す（ログ出力は呼び出し側の責務）。
    pub fn resolve(s: &str) -> (ContentKind, bool) {
        match s.parse() {
            Ok(kind) => (kind, true),
            Err(_) => (ContentKind::Unspecified, false),
        }
    }

    /// 少なくとも `target` バイトの新しいバッファを生成する。
    ///
    /// Random 系は正確に `target` バイト。Text は段落単位で追加するため
    /// 最大で 1 段落分だけ `target` を超えることがある。
    pub fn build(self, target: usize, rng: &RandomSource) -> Vec<u8> {
        match self {
            ContentKind::Text => build_text(target, rng),
            ContentKind::Random | ContentKind::Unspecified => build_random(target, rng),
        }
    }
}

fn build_random(target: usize, rng: &RandomSource) -> Vec<u8> {
    let mut buf = vec![0u8; target];
    rng.fill_bytes(&mut buf);
    buf
}

fn build_text(target: usize, rng: &RandomSource) -> Vec<u8> {
    rng.with_rng(|rng| {
        let mut li = LoremIpsum::new(rng);
        let mut buf = String::new();
        while buf.len() < target {
            buf.push_str(&li.paragraph());
            buf.push('\n');
        }
        buf.into_bytes()
    })
}
