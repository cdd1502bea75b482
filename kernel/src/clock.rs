use chrono::{NaiveDate, Utc};

// 「今日」の取得を差し替えられるようにしておく。
// 貸出日・返却日・延滞日数の計算はすべてこの能力を経由する
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

// 本番用。日付は UTC 基準で扱う
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

// テスト用の固定日付クロック
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
