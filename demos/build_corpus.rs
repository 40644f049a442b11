use quickdraw_corpus::corpus::{CorpusConfig, CorpusPipeline, QuickDraw, SplitBoundary};

const DATA_PATH: &str = "./data";

const NUM_TRAINING_IMAGES: usize = 10_000;
const NUM_TESTING_IMAGES: usize = 1_000;

const EXTENSION: &str = "jpg";
const IMG_WIDTH: u32 = 28;
const IMG_HEIGHT: u32 = 28;

// https://quickdraw.withgoogle.com/data
const CATEGORIES: [&str; 8] = [
    "cat", "axe", "bicycle", "skull", "rainbow", "tree", "zigzag", "cake",
];

fn main() {
    let config = CorpusConfig {
        data_root: DATA_PATH.into(),
        training_root: format!("{DATA_PATH}/training").into(),
        testing_root: format!("{DATA_PATH}/testing").into(),
        split: SplitBoundary::new(NUM_TRAINING_IMAGES, NUM_TESTING_IMAGES),
        extension: EXTENSION.to_owned(),
        img_width: IMG_WIDTH,
        img_height: IMG_HEIGHT,
    };

    let pipeline = CorpusPipeline::new(config).unwrap().with_timings(true);
    let categories: Vec<String> = CATEGORIES.iter().map(|c| c.to_string()).collect();

    let report = pipeline.run(&QuickDraw::default(), &categories).unwrap();
    println!(
        "removed {} stale + {} out-of-range, fetched {}, wrote {}",
        report.stale_removed, report.out_of_range_removed, report.fetched, report.written
    );
    for failure in &report.fetch_failures {
        println!("fetch failed: {failure}");
    }
}
