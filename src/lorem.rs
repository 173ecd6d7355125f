use rand::Rng;
use rand::seq::SliceRandom;

/// 生成に使うラテン語の単語リスト（ASCII のみ）
const WORDS: &[&str] = &[
    "a", "ac", "accumsan", "adipiscing", "aenean", "aliquam", "aliquet", "amet", "ante",
    "arcu", "at", "auctor", "augue", "bibendum", "blandit", "commodo", "condimentum",
    "consectetur", "consequat", "convallis", "cras", "curabitur", "cursus", "dapibus",
    "diam", "dictum", "dignissim", "dolor", "donec", "dui", "duis", "egestas", "eget",
    "eleifend", "elementum", "elit", "enim", "erat", "eros", "est", "et", "etiam", "eu",
    "euismod", "facilisis", "fames", "faucibus", "felis", "fermentum", "feugiat",
    "fringilla", "fusce", "gravida", "habitant", "hendrerit", "iaculis", "id", "imperdiet",
    "in", "integer", "interdum", "ipsum", "justo", "lacinia", "lacus", "laoreet", "lectus",
    "leo", "libero", "ligula", "lobortis", "lorem", "luctus", "maecenas", "magna",
    "malesuada", "massa", "mattis", "mauris", "metus", "mi", "molestie", "mollis", "morbi",
    "nam", "nec", "neque", "netus", "nibh", "nisi", "nisl", "non", "nulla", "nullam",
    "nunc", "odio", "orci", "ornare", "pellentesque", "pharetra", "phasellus", "placerat",
    "porta", "porttitor", "posuere", "praesent", "pretium", "proin", "pulvinar", "purus",
    "quam", "quis", "quisque", "rhoncus", "risus", "rutrum", "sagittis", "sapien",
    "scelerisque", "sed", "sem", "semper", "senectus", "sit", "sodales", "sollicitudin",
    "suscipit", "suspendisse", "tellus", "tempor", "tempus", "tincidunt", "tortor",
    "tristique", "turpis", "ullamcorper", "ultrices", "ultricies", "urna", "ut", "varius",
    "vehicula", "vel", "velit", "venenatis", "vestibulum", "vitae", "vivamus", "viverra",
    "volutpat", "vulputate",
];

/// 新しいジェネレータの最初の文はこの定型句で始まる
const OPENING: &[&str] = &[
    "lorem",
    "ipsum",
    "dolor",
    "sit",
    "amet,",
    "consectetur",
    "adipiscing",
    "elit",
];

const SENTENCE_WORDS: std::ops::RangeInclusive<usize> = 5..=15;
const PARAGRAPH_SENTENCES: std::ops::RangeInclusive<usize> = 3..=7;
const COMMA_PROBABILITY: f64 = 0.1;

/// Lorem ipsum 風のテキスト生成器
pub struct LoremIpsum<'a, R: Rng + ?Sized> {
    rng: &'a mut R,
    first: bool,
}

impl<'a, R: Rng + ?Sized> LoremIpsum<'a, R> {
    pub fn new(rng: &'a mut R) -> Self {
        Self { rng, first: true }
    }

    pub fn word(&mut self) -> &'static str {
        WORDS.choose(&mut *self.rng).copied().unwrap_or("lorem")
    }

    /// 先頭大文字・末尾ピリオドの一文
    pub fn sentence(&mut self) -> String {
        let len = self.rng.gen_range(SENTENCE_WORDS);
        let mut words: Vec<String> = Vec::with_capacity(len.max(OPENING.len()) + 4);

        let mut fixed = 0;
        if std::mem::take(&mut self.first) {
            fixed = OPENING.len();
            words.extend(OPENING.iter().map(|w| w.to_string()));
            let extra = self.rng.gen_range(0..=4);
            for _ in 0..extra {
                let w = self.word();
                words.push(w.to_string());
            }
        } else {
            for _ in 0..len {
                let w = self.word();
                words.push(w.to_string());
            }
        }

        // 定型句と最後の単語以外にたまにカンマを付ける
        let last = words.len() - 1;
        for w in words[..last].iter_mut().skip(fixed) {
            if !w.ends_with(',') && self.rng.gen_bool(COMMA_PROBABILITY) {
                w.push(',');
            }
        }

        let mut out = words.join(" ");
        if let Some(first) = out.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        out.push('.');
        out
    }

    pub fn paragraph(&mut self) -> String {
        let count = self.rng.gen_range(PARAGRAPH_SENTENCES);
        (0..count)
            .map(|_| self.sentence())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
