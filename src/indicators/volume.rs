/**
* filename : volume
* author : HAMA
* date: 2025. 5. 11.
* description: 누적 거래량 가중 평균 가격
**/

use super::Indicator;
use crate::models::{PriceBar, Series};

/// 누적 VWAP
///
/// 조회 구간 시작부터의 `Σ(typical * volume) / Σ(volume)`. 윈도우 없이 계속 누적한다.
/// 가격이나 거래량이 비어 있는(NaN) 봉은 합계에 넣지 않고, 그 위치의 값만 정의되지 않는다.
#[derive(Debug, Default)]
pub struct CumulativeVwap {
  cumulative_pv: f64,
  cumulative_volume: f64,
  count: usize,
  last_skipped: bool,
}

impl CumulativeVwap {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn cumulative_volume(&self) -> f64 {
    self.cumulative_volume
  }
}

impl Indicator for CumulativeVwap {
  fn name(&self) -> &str {
    "VWAP-cumulative"
  }

  fn update(&mut self, bar: &PriceBar) {
    let pv = bar.typical_price() * bar.volume;
    self.count += 1;
    self.last_skipped = !pv.is_finite() || !bar.volume.is_finite();
    if self.last_skipped {
      return;
    }
    self.cumulative_pv += pv;
    self.cumulative_volume += bar.volume;
  }

  fn value(&self) -> Option<f64> {
    if !self.is_ready() || self.last_skipped || self.cumulative_volume == 0.0 {
      return None;
    }
    let vwap = self.cumulative_pv / self.cumulative_volume;
    vwap.is_finite().then_some(vwap)
  }

  fn is_ready(&self) -> bool {
    self.count > 0
  }

  fn reset(&mut self) {
    *self = Self::default();
  }
}

/// 시계열 전체의 누적 VWAP
///
/// 결과는 입력과 길이/정렬이 같고, i번째 값은 0..=i 봉만 사용한다.
/// 누적 거래량이 0이거나 값이 정의되지 않는 위치는 NaN.
pub fn cumulative_vwap(bars: &[PriceBar]) -> Vec<f64> {
  let mut vwap = CumulativeVwap::new();
  bars.iter()
    .map(|bar| {
      vwap.update(bar);
      vwap.value().unwrap_or(f64::NAN)
    })
    .collect()
}

/// `Series` 편의 함수
pub fn series_vwap(series: &Series) -> Vec<f64> {
  cumulative_vwap(series.bars())
}
