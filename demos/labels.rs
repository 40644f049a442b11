use quickdraw_corpus::corpus::sync::list_categories;

fn main() {
    let categories = list_categories("./data").unwrap();
    for (position, category) in categories.iter().enumerate() {
        println!("{position}: {category}");
    }
}
