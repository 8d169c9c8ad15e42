// mnist_demo/src/main.rs
use anyhow::Result;
use log::info;
use mnist_net::{MnistData, NeuralNet, TestRun, TrainingRun};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::env;
use std::fs::File;

fn main() -> Result<()> {
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let mut args = env::args().skip(1);
    let train_path = args.next().unwrap_or_else(|| "data/mnist_train.csv".into());
    let test_path = args.next().unwrap_or_else(|| "data/mnist_test.csv".into());

    // 784 input pixels, 100 hidden nodes, 10 digit classes, learning rate 0.3
    let mut net = NeuralNet::new(784, 100, 10, 0.3);

    println!("=== Training ===");
    let mut train_data = MnistData::new();
    train_data.load(File::open(&train_path)?)?;
    info!(
        "{} of {} training records selected, {} epoch(s)",
        train_data.used_data_sets(),
        train_data.count_data(),
        train_data.epochs()
    );
    let trained = TrainingRun::new(&mut net, &train_data).run()?;
    println!(
        "Neural net trained with {} data sets (counter: {})",
        trained, net.training_data_counter
    );

    println!("\n=== Testing ===");
    let mut test_data = MnistData::new();
    test_data.load(File::open(&test_path)?)?;
    let card = TestRun::new(&mut net, &test_data).run()?;

    println!("+-------+--------+---------+----------+");
    println!("| Digit | Tested | Correct | Accuracy |");
    println!("+-------+--------+---------+----------+");
    for digit in 0..10u8 {
        let total = card.total(digit);
        let correct = card.correct(digit);
        let accuracy = if total == 0 {
            0.0
        } else {
            f64::from(correct) / f64::from(total) * 100.0
        };
        println!("| {digit:>5} | {total:>6} | {correct:>7} | {accuracy:>7.2}% |");
    }
    println!("+-------+--------+---------+----------+");
    println!(
        "Overall accuracy: {:.2}% (best so far: {:.2}%)",
        card.accuracy() * 100.0,
        net.best_performance() * 100.0
    );

    Ok(())
}
