/**
* filename : mod
* author : HAMA
* date: 2025. 5. 11.
* description: 
**/
pub mod volume;

pub use volume::*;

use std::fmt::Debug;

use crate::models::PriceBar;

pub trait Indicator: Debug + Send + Sync {
  fn name(&self) -> &str;

  // 새 봉으로 지표 업데이트
  fn update(&mut self, bar: &PriceBar);

  // 현재 지표 값 (계산 불가하면 None)
  fn value(&self) -> Option<f64>;

  // 지표가 계산 가능한지 (충분한 데이터가 있는지) 확인
  fn is_ready(&self) -> bool;

  // 지표 상태 리셋
  fn reset(&mut self);
}
