//! One-shot training and testing runs over the selected dataset subset.
//!
//! A run borrows the network mutably for its whole duration, so two runs can
//! never overlap or share run-state by accident. Each run is synchronous and
//! uninterruptible; drivers that need progress reporting or cancellation
//! call [`NeuralNet::train`]/[`NeuralNet::query`] directly in their own
//! chunked loops.
use crate::dataset::{MnistData, CLASSES};
use crate::error::Result;
use crate::network::NeuralNet;
use ndarray::Array1;

/// Index of the strongest output activation.
pub fn argmax(output: &Array1<f64>) -> usize {
    output
        .iter()
        .enumerate()
        .fold(0usize, |max_i, (i, &v)| if v > output[max_i] { i } else { max_i })
}

/// Per-digit tally of one test session.
#[derive(Debug, Clone, Default)]
pub struct Scorecard {
    total: [u32; CLASSES],
    correct: [u32; CLASSES],
}

impl Scorecard {
    fn record(&mut self, digit: u8, correct: bool) {
        self.total[usize::from(digit)] += 1;
        if correct {
            self.correct[usize::from(digit)] += 1;
        }
    }

    /// How many samples of `digit` were tested.
    pub fn total(&self, digit: u8) -> u32 {
        self.total[usize::from(digit)]
    }

    /// How many samples of `digit` were identified correctly.
    pub fn correct(&self, digit: u8) -> u32 {
        self.correct[usize::from(digit)]
    }

    /// Overall fraction of correctly identified samples, 0.0 when nothing
    /// was tested.
    pub fn accuracy(&self) -> f64 {
        let tested: u32 = self.total.iter().sum();
        if tested == 0 {
            return 0.0;
        }
        let correct: u32 = self.correct.iter().sum();
        f64::from(correct) / f64::from(tested)
    }
}

/// A single training session: `epochs` online-SGD passes over the first
/// `used_data_sets` records.
pub struct TrainingRun<'a> {
    net: &'a mut NeuralNet,
    data: &'a MnistData,
}

impl<'a> TrainingRun<'a> {
    pub fn new(net: &'a mut NeuralNet, data: &'a MnistData) -> Self {
        Self { net, data }
    }

    /// Run to completion and return the number of samples applied. The
    /// network's training counter advances by that amount.
    pub fn run(self) -> Result<usize> {
        let mut trained = 0;
        for epoch in 0..self.data.epochs() {
            for i in 0..self.data.used_data_sets() {
                self.net
                    .train(&self.data.input(i)?, &self.data.output(i)?)?;
                trained += 1;
            }
            log::debug!(
                "epoch {}/{} done, {} samples so far",
                epoch + 1,
                self.data.epochs(),
                trained
            );
        }
        self.net.training_data_counter += trained;
        log::info!("training run applied {trained} samples");
        Ok(trained)
    }
}

/// A single test session: queries the first `used_data_sets` records and
/// scores `argmax(output)` against the stored labels.
pub struct TestRun<'a> {
    net: &'a mut NeuralNet,
    data: &'a MnistData,
}

impl<'a> TestRun<'a> {
    pub fn new(net: &'a mut NeuralNet, data: &'a MnistData) -> Self {
        Self { net, data }
    }

    /// Run to completion, push the session's accuracy into the network's
    /// performance history, and return the per-digit scorecard.
    pub fn run(self) -> Result<Scorecard> {
        let mut card = Scorecard::default();
        for i in 0..self.data.used_data_sets() {
            let number = self.data.number(i)?;
            let answer = self.net.query(&self.data.input(i)?)?;
            card.record(number, argmax(&answer) == usize::from(number));
        }
        self.net.performance.push(card.accuracy());
        log::info!(
            "test run over {} samples: accuracy {:.4}",
            self.data.used_data_sets(),
            card.accuracy()
        );
        Ok(card)
    }
}
