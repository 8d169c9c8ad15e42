//! A minimal neural network crate for handwritten digit recognition:
//! a three-layer sigmoid network, online SGD training, and an MNIST
//! CSV dataset manager.
//!
//! - NeuralNet with Xavier-style initialization, query (inference) and
//!   train (one SGD step per sample)
//! - MnistData loader for `label,p1,...,p784` records with on-demand
//!   normalization
//! - TrainingRun / TestRun one-shot sessions over the selected subset
//! - Performance history with best-score reporting

pub mod dataset;
pub mod error;
pub mod network;
pub mod performance;
pub mod session;

pub use dataset::MnistData;
pub use error::{Error, Result};
pub use network::NeuralNet;
pub use performance::Performance;
pub use session::{argmax, Scorecard, TestRun, TrainingRun};
