use std::{fs, io::ErrorKind, path::Path};

use super::errors::CorpusError;
use super::npy::RAW_SUFFIX;
use super::split::SplitBoundary;

pub fn list_categories<P: AsRef<Path>>(data_root: P) -> Result<Vec<String>, CorpusError> {
    let mut categories = Vec::new();
    for entry in fs::read_dir(data_root)? {
        let entry = entry?;
        let name = entry.file_name();
        if let Some(name) = name.to_str() {
            if let Some(stem) = name.strip_suffix(RAW_SUFFIX) {
                categories.push(stem.to_owned());
            }
        }
    }
    // this order doubles as the label order downstream, keep it stable
    categories.sort();
    Ok(categories)
}

pub fn prune_categories(
    data_root: &Path,
    training_root: &Path,
    testing_root: &Path,
    desired: &[String],
) -> Result<usize, CorpusError> {
    let mut removed = 0;

    for entry in fs::read_dir(data_root)? {
        let entry = entry?;
        let name = entry.file_name();
        let name = match name.to_str() {
            Some(name) => name,
            None => continue,
        };
        if let Some(stem) = name.strip_suffix(RAW_SUFFIX) {
            if !desired.iter().any(|category| category == stem) {
                remove_file_if_present(&entry.path())?;
                removed += 1;
            }
        }
    }

    for root in [training_root, testing_root] {
        for entry in fs::read_dir(root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name();
            let name = match name.to_str() {
                Some(name) => name,
                None => continue,
            };
            if !desired.iter().any(|category| category == name) {
                remove_dir_if_present(&entry.path())?;
                removed += 1;
            }
        }
    }

    Ok(removed)
}

pub fn prune_out_of_range(
    training_root: &Path,
    testing_root: &Path,
    desired: &[String],
    split: SplitBoundary,
) -> Result<usize, CorpusError> {
    let mut removed = 0;

    for category in desired {
        let dirs = [
            (training_root.join(category), true),
            (testing_root.join(category), false),
        ];
        for (dir, is_training) in dirs {
            if !dir.is_dir() {
                continue;
            }
            for entry in fs::read_dir(&dir)? {
                let entry = entry?;
                let name = entry.file_name();
                let name = match name.to_str() {
                    Some(name) => name,
                    None => continue,
                };
                let number = match image_index(name) {
                    Some(number) => number,
                    None => {
                        println!("Skipping foreign file {}", entry.path().display());
                        continue;
                    }
                };
                let keep = if is_training {
                    split.keeps_training_file(number)
                } else {
                    split.keeps_testing_file(number)
                };
                if !keep {
                    remove_file_if_present(&entry.path())?;
                    removed += 1;
                }
            }
        }
    }

    println!("Removed {removed} out-of-range images");
    Ok(removed)
}

pub fn image_index(file_name: &str) -> Option<usize> {
    let stem = file_name.split('.').next()?;
    stem.parse().ok()
}

fn remove_file_if_present(path: &Path) -> Result<(), std::io::Error> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

fn remove_dir_if_present(path: &Path) -> Result<(), std::io::Error> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn image_index_parses_leading_integer() {
        assert_eq!(image_index("12.jpg"), Some(12));
        assert_eq!(image_index("7.png"), Some(7));
        assert_eq!(image_index("3"), Some(3));
        assert_eq!(image_index("notes.txt"), None);
        assert_eq!(image_index(".jpg"), None);
        assert_eq!(image_index("12a.jpg"), None);
    }

    #[test]
    fn list_categories_is_sorted_and_suffix_filtered() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("zigzag.npy"), b"").unwrap();
        fs::write(dir.path().join("axe.npy"), b"").unwrap();
        fs::write(dir.path().join("readme.md"), b"").unwrap();

        let categories = list_categories(dir.path()).unwrap();
        assert_eq!(categories, vec!["axe".to_owned(), "zigzag".to_owned()]);
    }

    #[test]
    fn prune_out_of_range_leaves_foreign_files_alone() {
        let dir = tempdir().unwrap();
        let training = dir.path().join("training");
        let testing = dir.path().join("testing");
        fs::create_dir_all(training.join("cat")).unwrap();
        fs::create_dir_all(testing.join("cat")).unwrap();
        fs::write(training.join("cat/1.png"), b"x").unwrap();
        fs::write(training.join("cat/9.png"), b"x").unwrap();
        fs::write(training.join("cat/notes.txt"), b"x").unwrap();

        let desired = vec!["cat".to_owned()];
        let removed =
            prune_out_of_range(&training, &testing, &desired, SplitBoundary::new(5, 0)).unwrap();

        assert_eq!(removed, 1);
        assert!(training.join("cat/1.png").exists());
        assert!(!training.join("cat/9.png").exists());
        assert!(training.join("cat/notes.txt").exists());
    }

    #[test]
    fn prune_categories_removes_stale_raw_files_and_dirs() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("data");
        let training = data.join("training");
        let testing = data.join("testing");
        fs::create_dir_all(training.join("dog")).unwrap();
        fs::create_dir_all(testing.join("dog")).unwrap();
        fs::create_dir_all(training.join("cat")).unwrap();
        fs::create_dir_all(testing.join("cat")).unwrap();
        fs::write(data.join("cat.npy"), b"x").unwrap();
        fs::write(data.join("dog.npy"), b"x").unwrap();

        let desired = vec!["cat".to_owned()];
        let removed = prune_categories(&data, &training, &testing, &desired).unwrap();

        assert_eq!(removed, 3);
        assert!(data.join("cat.npy").exists());
        assert!(!data.join("dog.npy").exists());
        assert!(training.join("cat").is_dir());
        assert!(!training.join("dog").exists());
        assert!(!testing.join("dog").exists());
    }
}
