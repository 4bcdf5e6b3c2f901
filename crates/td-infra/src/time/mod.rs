mod sleeper;

pub use sleeper::TokioSleeper;
