/**
* filename : mod
* author : HAMA
* date: 2025. 5. 11.
* description: 
**/

pub mod breakout;

pub use breakout::{detect, is_fresh_breakout, BREAKOUT_WINDOW};
