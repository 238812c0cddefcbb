//! Fit a two-topic mixture of multinomials to a three-document toy corpus.
//!
//! Progress is reported through the `log` facade; set `RUST_LOG=debug` to
//! also see the start banner and the termination status.
use std::collections::BTreeMap;
use std::error::Error;

use multinomial_mixture::mixture::prelude::*;

fn toy_corpus() -> BTreeMap<usize, BTreeMap<usize, i64>> {
    BTreeMap::from([
        (0, BTreeMap::from([(0, 100), (1, 29)])),
        (1, BTreeMap::from([(2, 100), (4, 150)])),
        (2, BTreeMap::from([(0, 100), (1, 120), (2, 230), (4, 10)])),
    ])
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let corpus = Corpus::from_map(&toy_corpus(), 5)?;
    let em_opts = EMOptions::new(30, 1e-3)?.with_verbose(true);
    let options = MixOptions::new(Init::uniform(), em_opts, Some(1));
    let mut model = MixMulti::new(corpus, 2, 5, options)?;

    let outcome = model.fit()?.clone();

    println!("{} after {} iterations", outcome.status, outcome.iterations);
    println!("Likelihood history: {:?}", outcome.loglik_history);
    println!("P =\n{:.4}", model.topic_word());
    println!("Pi =\n{:.4}", model.doc_topic());
    println!("Dominant topics: {:?}", model.dominant_topics()?);
    for topic in 0..model.shape().nb_topics {
        println!("Topic {topic} top words: {:?}", model.top_words(topic, 3)?);
    }
    println!("Perplexity: {:.4}", model.perplexity()?);
    Ok(())
}
