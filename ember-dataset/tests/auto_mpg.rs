use std::io::Write;
use ember_dataset::{
    common::{AutoMpgBatcher, AutoMpgConfig, AutoMpgDataset, AutoMpgError, AutoMpgItem},
    transform::{random_split, MapDataset},
    DataLoader, Dataset, TensorPairBatcher,
};
use tempfile::NamedTempFile;

const RAW: &str = "\
18.0   8   307.0      130.0      3504.      12.0   70  1\t\"chevrolet chevelle malibu\"
15.0   8   350.0      165.0      3693.      11.5   70  1\t\"buick skylark 320\"
18.0   8   318.0      150.0      3436.      11.0   70  1\t\"plymouth satellite\"
16.0   8   304.0      150.0      3433.      12.0   70  1\t\"amc rebel sst\"
25.0   4   98.00      ?          2046.      19.0   71  1\t\"ford pinto\"
24.0   4   113.0      95.00      2372.      15.0   70  3\t\"toyota corona mark ii\"
26.0   4   97.00      46.00      1835.      20.5   70  2\t\"volkswagen 1131 deluxe sedan\"
25.0   4   110.0      87.00      2672.      17.5   70  2\t\"peugeot 504\"
";

fn temp_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn cars() -> AutoMpgDataset {
    let file = temp_file(".data", RAW);
    AutoMpgDataset::from_path(file.path(), &AutoMpgConfig::default()).unwrap()
}

#[test]
fn load_raw_file() {
    let ds = cars();
    assert_eq!(ds.len(), 7);
    assert_eq!(ds.frame().width(), 9);

    let (features, label) = ds.get(0).unwrap();
    assert_eq!(features.dims(), &[9]);
    assert_eq!(label.to_scalar().unwrap(), 18.0);
    assert!(ds.get(7).is_none());
}

#[test]
fn load_csv_file() {
    let csv = "\
MPG,Cylinders,Displacement,Horsepower,Weight,Acceleration,Model Year,Origin,Car Name
18,8,307,130,3504,12,70,1,chevrolet chevelle malibu
25,4,98,,2046,19,71,1,ford pinto
24,4,113,95,2372,15,70,3,toyota corona mark ii
";
    let file = temp_file(".csv", csv);
    let ds = AutoMpgDataset::from_path(file.path(), &AutoMpgConfig::default()).unwrap();
    assert_eq!(ds.len(), 2);

    let (features, label) = ds.get(1).unwrap();
    assert_eq!(features.to_vec(), [4.0, 113.0, 95.0, 2372.0, 15.0, 70.0, 0.0, 0.0, 1.0]);
    assert_eq!(label.to_scalar().unwrap(), 24.0);
}

#[test]
fn csv_extension_matches_any_case() {
    let csv = "\
mpg,cylinders,displacement,horsepower,weight,acceleration,model_year,origin
26,4,97,46,1835,20.5,70,2
";
    let file = temp_file(".CSV", csv);
    let ds = AutoMpgDataset::from_path(file.path(), &AutoMpgConfig::default()).unwrap();
    assert_eq!(ds.len(), 1);
    assert_eq!(ds.get(0).unwrap().1.to_scalar().unwrap(), 26.0);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = AutoMpgDataset::from_path(dir.path().join("nope.data"), &AutoMpgConfig::default());
    assert!(matches!(err, Err(AutoMpgError::Io(_))));
}

#[test]
fn cached_file_is_not_downloaded() {
    let dir = tempfile::tempdir().unwrap();
    let cached = dir.path().join("auto-mpg").join("auto-mpg.data");
    std::fs::create_dir_all(cached.parent().unwrap()).unwrap();
    std::fs::write(&cached, RAW).unwrap();

    let ds = AutoMpgDataset::load(&AutoMpgConfig::default().cache_dir(dir.path())).unwrap();
    assert_eq!(ds.len(), 7);
}

#[test]
fn batches_cover_dataset_in_order() {
    let ds = cars();
    let labels: Vec<f64> = ds.labels().values.clone();

    let loader = DataLoader::new(ds, AutoMpgBatcher, 3).unwrap();
    assert_eq!(loader.batch_count(), 3);

    let batches: Vec<_> = loader.iter().collect::<Result<_, _>>().unwrap();
    let sizes: Vec<usize> = batches.iter().map(|b| b.features.dims()[0]).collect();
    assert_eq!(sizes, [3, 3, 1]);
    assert!(batches.iter().all(|b| b.features.dims()[1] == 9));

    let targets: Vec<f64> = batches
        .iter()
        .flat_map(|b| b.targets.to_vec())
        .map(f64::from)
        .collect();
    assert_eq!(targets, labels);
}

#[test]
fn pair_batcher_matches_auto_mpg_batcher() {
    let loader = DataLoader::new(cars(), TensorPairBatcher::<f32>::new(), 4).unwrap();
    let (xs, ys) = loader.iter().next().unwrap().unwrap();
    assert_eq!(xs.dims(), &[4, 9]);
    assert_eq!(ys.dims(), &[4]);

    let batch = DataLoader::new(cars(), AutoMpgBatcher, 4)
        .unwrap()
        .into_iter()
        .next()
        .unwrap()
        .unwrap();
    assert!(batch.features.allclose(&xs, 0.0, 0.0));
    assert!(batch.targets.allclose(&ys, 0.0, 0.0));
}

#[test]
fn split_then_standardize() {
    let (train, test) = random_split::<_, AutoMpgItem>(cars(), 0.7, 7).unwrap();
    assert_eq!(train.len(), 4);
    assert_eq!(test.len(), 3);

    let train_set = train.wrapped.select(&train.indices).unwrap();
    let test_set = test.wrapped.select(&test.indices).unwrap();
    let stats = train_set.feature_stats();

    let train_set = train_set.standardized(&stats).unwrap();
    let test_set = test_set.standardized(&stats).unwrap();
    assert_eq!(train_set.len() + test_set.len(), 7);

    for stat in train_set.feature_stats() {
        assert!(stat.mean.abs() < 1e-9, "{} not centered", stat.name);
    }
}

#[test]
fn map_dataset_over_auto_mpg() {
    let labels_only = MapDataset::<_, _, AutoMpgItem>::new(cars(), |(_, label): &AutoMpgItem| {
        label.to_scalar().unwrap()
    });
    let mpgs: Vec<f32> = labels_only.iter().collect();
    assert_eq!(mpgs, [18.0, 15.0, 18.0, 16.0, 24.0, 26.0, 25.0]);
}
