use std::env;

use markov_core::model::markov_model::{MarkovModel, NO_SUCCESSOR};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // I/O failures while loading a source file are logged, not propagated
    env_logger::init();

    // Usage: markov-exemple [source_file] [order]
    // Without arguments, a built-in sample text is used
    let args: Vec<String> = env::args().collect();
    let order: usize = match args.get(2) {
        Some(k) => k.parse()?,
        None => 2,
    };

    let model = match args.get(1) {
        // On a missing or unreadable file this degrades to an empty model
        Some(path) => MarkovModel::from_file(order, path)?,
        None => MarkovModel::new(order, "agggcagcgggcg")?,
    };

    println!("order = {}, distinct kgrams: {}", model.order(), model.len());
    println!("The first kgram: {}", model.first_kgram());

    let mut kgrams: Vec<&str> = model.kgrams().collect();
    kgrams.sort();
    println!("All kgrams: {:?}", kgrams);
    println!("The Markov model: {}", model);

    if model.is_empty() {
        println!("The model is empty, nothing to sample");
        return Ok(());
    }

    // Sampling fails only on an empty model
    let random = model.random_kgram()?;
    println!("A random kgram: {}", random);
    println!("Next letter after {}: {:?}", random, model.next_char(random)?);

    // Generate a short sequence by sliding the window over the sampled
    // characters, stopping at the end-of-text sentinel
    let mut text = model.first_kgram().to_owned();
    for _ in 0..60 {
        let window: String = text
            .chars()
            .rev()
            .take(model.order())
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        match model.next_char(&window)? {
            NO_SUCCESSOR => break,
            c => text.push(c),
        }
    }
    println!("Generated text: {}", text);

    Ok(())
}
