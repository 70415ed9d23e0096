use std::path::PathBuf;
use anyhow::Context;
use clap::Parser;
use ember_dataset::{
    common::{AutoMpgBatcher, AutoMpgConfig, AutoMpgDataset, AutoMpgItem},
    transform::random_split,
    DataLoader, Dataset,
};

/// Loads the Auto MPG table, splits it into train and test sets and walks
/// both in batches.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Local `auto-mpg.data` or `.csv` export; the UCI copy is downloaded when omitted
    #[arg(long)]
    data: Option<PathBuf>,

    /// TOML file with dataset options (`label`, `drop_na`, `one_hot_origin`, `cache_dir`)
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    cache_dir: Option<PathBuf>,

    #[arg(long, default_value_t = 32)]
    batch_size: usize,

    #[arg(long, default_value_t = 0.8)]
    train_ratio: f64,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Z-score the features with statistics of the training split
    #[arg(long)]
    standardize: bool,
}

fn load_config(args: &Args) -> anyhow::Result<AutoMpgConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => AutoMpgConfig::default(),
    };
    if let Some(dir) = &args.cache_dir {
        config = config.cache_dir(dir.clone());
    }
    Ok(config)
}

fn result_main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    let dataset = match &args.data {
        Some(path) => AutoMpgDataset::from_path(path, &config)
            .with_context(|| format!("loading {}", path.display()))?,
        None => AutoMpgDataset::load(&config).context("downloading auto-mpg")?,
    };
    println!("{} cars, label '{}'", dataset.len(), dataset.label_name());
    println!("features: {:?}", dataset.feature_names());

    let (train, test) = random_split::<_, AutoMpgItem>(dataset, args.train_ratio, args.seed)?;
    let mut train_set = train.wrapped.select(&train.indices)?;
    let mut test_set = test.wrapped.select(&test.indices)?;

    if args.standardize {
        let stats = train_set.feature_stats();
        for stat in stats.iter() {
            log::info!("{:>14}: mean {:>9.3}, std {:>8.3}", stat.name, stat.mean, stat.std);
        }
        train_set = train_set.standardized(&stats)?;
        test_set = test_set.standardized(&stats)?;
    }

    if let Some((features, label)) = train_set.get(0) {
        println!("first item: {features}, label {label}");
    }

    let train_loader = DataLoader::new(train_set, AutoMpgBatcher, args.batch_size)?;
    let test_loader = DataLoader::new(test_set, AutoMpgBatcher, args.batch_size)?;

    for (name, loader) in [("train", &train_loader), ("test", &test_loader)] {
        println!(
            "{name}: {} items in {} batches",
            loader.dataset().len(),
            loader.batch_count()
        );
        for (i, batch) in loader.iter().enumerate() {
            let batch = batch?;
            log::debug!(
                "{name} batch {i}: features {}, targets {}",
                batch.features.shape(),
                batch.targets.shape()
            );
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = result_main() {
        eprintln!("Err: {:#}", e);
        std::process::exit(1);
    }
}
