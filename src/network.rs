//! Three-layer feedforward network: sigmoid forward pass and online SGD training.
use crate::error::{Error, Result};
use crate::performance::Performance;
use ndarray::{Array1, Array2, Axis};
use ndarray_rand::rand_distr::Normal;
use ndarray_rand::RandomExt;

/// Sigmoid activation: `f(x) = 1 / (1 + e^-x)`, squashes any real input to (0, 1).
fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Outer product of a column vector and a row vector.
fn outer(col: &Array1<f64>, row: &Array1<f64>) -> Array2<f64> {
    let col = col.view().insert_axis(Axis(1));
    let row = row.view().insert_axis(Axis(0));
    col.dot(&row)
}

/// Weights drawn from a zero-mean normal with standard deviation `fan_in^-0.5`
/// (Xavier-style, keeps activation variance stable across layers).
fn xavier(rows: usize, cols: usize, fan_in: usize) -> Array2<f64> {
    let std_dev = (fan_in as f64).powf(-0.5);
    let dist = Normal::new(0.0, std_dev).expect("fan-in must be at least 1");
    Array2::random_using((rows, cols), dist, &mut rand::thread_rng())
}

/// A network with one hidden layer, holding two dense weight matrices.
///
/// Weight entries are `w_i_j`, where the link runs from node `i` to node `j`
/// in the next layer. Node counts are fixed at construction; the weight
/// matrices are mutated only by [`train`](Self::train) and replaced wholesale
/// by [`reset`](Self::reset). Not internally synchronized; callers serialize
/// access.
#[derive(Debug, Clone)]
pub struct NeuralNet {
    inodes: usize,
    hnodes: usize,
    onodes: usize,
    /// input→hidden link weights, shape (hidden, input)
    wih: Array2<f64>,
    /// hidden→output link weights, shape (output, hidden)
    who: Array2<f64>,
    lr: f64,
    /// Number of training samples applied so far. The driver advances this
    /// after successful training calls; counting policy (per sample, per
    /// batch) stays outside the core.
    pub training_data_counter: usize,
    /// Accuracy fraction recorded per completed test session.
    pub performance: Performance,
}

impl NeuralNet {
    /// Create a network with freshly randomized weights.
    ///
    /// The concrete MNIST deployment uses `(784, 100, 10, 0.3)`.
    pub fn new(
        input_nodes: usize,
        hidden_nodes: usize,
        output_nodes: usize,
        learning_rate: f64,
    ) -> Self {
        Self {
            inodes: input_nodes,
            hnodes: hidden_nodes,
            onodes: output_nodes,
            wih: xavier(hidden_nodes, input_nodes, input_nodes),
            who: xavier(output_nodes, hidden_nodes, hidden_nodes),
            lr: learning_rate,
            training_data_counter: 0,
            performance: Performance::new(),
        }
    }

    /// Re-randomize both weight matrices, zero the training counter, and
    /// clear the performance history. Node counts are unchanged.
    pub fn reset(&mut self, learning_rate: f64) {
        self.wih = xavier(self.hnodes, self.inodes, self.inodes);
        self.who = xavier(self.onodes, self.hnodes, self.hnodes);
        self.lr = learning_rate;
        self.training_data_counter = 0;
        self.performance.clear();
        log::debug!(
            "network reset: {}-{}-{} lr={}",
            self.inodes,
            self.hnodes,
            self.onodes,
            learning_rate
        );
    }

    pub fn input_nodes(&self) -> usize {
        self.inodes
    }

    pub fn hidden_nodes(&self) -> usize {
        self.hnodes
    }

    pub fn output_nodes(&self) -> usize {
        self.onodes
    }

    pub fn learning_rate(&self) -> f64 {
        self.lr
    }

    pub fn set_learning_rate(&mut self, learning_rate: f64) {
        self.lr = learning_rate;
    }

    /// Best accuracy ever recorded, 0.0 when no test session has run.
    pub fn best_performance(&self) -> f64 {
        self.performance.best()
    }

    fn check_len(&self, actual: usize, expected: usize) -> Result<()> {
        if actual != expected {
            return Err(Error::DimensionMismatch { expected, actual });
        }
        Ok(())
    }

    /// Forward pass: trigger the input vector at the input nodes and return
    /// the activations at the output nodes. Pure; does not mutate weights.
    pub fn query(&self, inputs: &Array1<f64>) -> Result<Array1<f64>> {
        self.check_len(inputs.len(), self.inodes)?;

        // Summarize weighted signals into each layer, then squash.
        let hidden_outputs = self.wih.dot(inputs).mapv(sigmoid);
        let final_outputs = self.who.dot(&hidden_outputs).mapv(sigmoid);

        Ok(final_outputs)
    }

    /// One online stochastic-gradient-descent step on a single sample.
    ///
    /// Both length checks run before any computation, so a rejected call
    /// leaves the weights untouched.
    pub fn train(&mut self, inputs: &Array1<f64>, targets: &Array1<f64>) -> Result<()> {
        self.check_len(inputs.len(), self.inodes)?;
        self.check_len(targets.len(), self.onodes)?;

        // Forward pass, identical to query.
        let hidden_outputs = self.wih.dot(inputs).mapv(sigmoid);
        let final_outputs = self.who.dot(&hidden_outputs).mapv(sigmoid);

        // Output layer error is (target - actual); hidden layer error is the
        // output error split by the link weights and recombined at the
        // hidden nodes.
        let output_errors = targets - &final_outputs;
        let hidden_errors = self.who.t().dot(&output_errors);

        // Delta rule: error ⊙ sigmoid'(activation), outer product against
        // the activations feeding the layer.
        let output_grad = &output_errors * &final_outputs * (1.0 - &final_outputs);
        self.who += &(self.lr * outer(&output_grad, &hidden_outputs));

        let hidden_grad = &hidden_errors * &hidden_outputs * (1.0 - &hidden_outputs);
        self.wih += &(self.lr * outer(&hidden_grad, inputs));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn query_is_deterministic_for_fixed_weights() {
        let net = NeuralNet::new(4, 6, 3, 0.3);
        let input = array![0.2, 0.4, 0.6, 0.8];
        let first = net.query(&input).unwrap();
        let second = net.query(&input).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn query_output_stays_inside_sigmoid_range() {
        let net = NeuralNet::new(8, 5, 4, 0.3);
        let input = Array1::from_elem(8, 0.75);
        let output = net.query(&input).unwrap();
        assert_eq!(output.len(), 4);
        for &value in output.iter() {
            assert!(value > 0.0 && value < 1.0, "out of range: {value}");
        }
    }

    #[test]
    fn query_rejects_mismatched_input_length() {
        let net = NeuralNet::new(784, 100, 10, 0.3);
        let short = Array1::from_elem(10, 0.5);
        let err = net.query(&short).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                expected: 784,
                actual: 10
            }
        ));
    }

    #[test]
    fn train_rejects_bad_target_without_touching_weights() {
        let mut net = NeuralNet::new(4, 3, 2, 0.3);
        let input = array![0.1, 0.2, 0.3, 0.4];
        let before = net.query(&input).unwrap();

        let bad_target = Array1::from_elem(5, 0.5);
        assert!(net.train(&input, &bad_target).is_err());

        // All-or-nothing: the rejected call must not have applied a
        // partial update.
        assert_eq!(net.query(&input).unwrap(), before);
    }

    #[test]
    fn reset_clears_counters_and_rerandomizes_weights() {
        let mut net = NeuralNet::new(4, 6, 3, 0.3);
        let input = array![0.9, 0.1, 0.5, 0.5];
        let before = net.query(&input).unwrap();

        net.training_data_counter = 1234;
        net.performance.push(0.8);
        net.reset(0.1);

        assert_eq!(net.training_data_counter, 0);
        assert!(net.performance.is_empty());
        assert_eq!(net.learning_rate(), 0.1);
        // Fresh random draws make an identical output vanishingly unlikely.
        assert_ne!(net.query(&input).unwrap(), before);
    }

    #[test]
    fn repeated_training_converges_on_a_single_sample() {
        let mut net = NeuralNet::new(2, 2, 2, 0.5);
        let input = array![0.9, 0.1];
        let target = array![0.99, 0.01];
        for _ in 0..500 {
            net.train(&input, &target).unwrap();
        }
        let output = net.query(&input).unwrap();
        assert!(
            output[0] > output[1],
            "expected class 0 to dominate: {output:?}"
        );
    }
}
