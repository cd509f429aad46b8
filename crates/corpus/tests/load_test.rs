use corpus::{CorpusLoadError, RecipeCorpus};
use std::io::Write;

fn write_csv(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_dataset_export() {
    // BOM on the header, columns out of order, an extra index column
    let file = write_csv(
        "\u{feff}Cleaned_Ingredients,Image_Name,Instructions,Ingredients,Title,Unused\n\
         \"['2 lb beef', 'salt']\",beef-stew,\"Brown the beef.\r\n\r\nSimmer 2 hours.\",\"['2 lb beef', 'salt']\",Beef Stew,x\n\
         \"[\u{2018}bread\u{2019}]\",,Toast it.,\"[\u{201c}bread\u{201d}, \u{201c}butter\u{201d}]\",,y\n\
         \"chef's salt\",salad,,\"['chef's salt', 'greens']\",  Green Salad  ,z\n",
    );

    let corpus = RecipeCorpus::load_from_file(file.path()).unwrap();
    assert_eq!(corpus.len(), 3);

    let stew = corpus.get("0").unwrap();
    assert_eq!(stew.title, "Beef Stew");
    assert_eq!(stew.ingredients, vec!["2 lb beef", "salt"]);
    assert_eq!(stew.instructions, vec!["Brown the beef.", "Simmer 2 hours."]);
    assert_eq!(stew.image_name.as_deref(), Some("beef-stew"));

    // Blank title and image
    let toast = corpus.get("1").unwrap();
    assert_eq!(toast.title, "Recipe 2");
    assert_eq!(toast.image_name, None);
    assert_eq!(toast.ingredients, vec!["bread", "butter"]);

    // The apostrophe breaks the list syntax; fragments survive
    let salad = corpus.get("2").unwrap();
    assert_eq!(salad.title, "Green Salad");
    assert_eq!(salad.ingredients, vec!["chef's salt", "greens"]);
    assert!(salad.instructions.is_empty());
    assert!(salad.mentions("salt"));
}

#[test]
fn test_ids_follow_row_positions() {
    let mut csv = String::from("Title,Cleaned_Ingredients\n");
    for n in 0..250 {
        csv.push_str(&format!("Dish {n},item {n}\n"));
    }
    let file = write_csv(&csv);

    let corpus = RecipeCorpus::load_from_file(file.path()).unwrap();
    assert_eq!(corpus.len(), 250);
    for (pos, recipe) in corpus.recipes().iter().enumerate() {
        assert_eq!(recipe.id, pos.to_string());
        assert_eq!(recipe.title, format!("Dish {pos}"));
    }
    assert_eq!(corpus.search_title("dish 24").len(), 1 + 10);
}

#[test]
fn test_header_only_export_is_empty_error() {
    let file = write_csv("Title,Ingredients,Instructions,Image_Name,Cleaned_Ingredients\n");
    let result = RecipeCorpus::load_from_file(file.path());
    assert!(matches!(result, Err(CorpusLoadError::Empty { .. })));
}
