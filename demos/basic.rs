use card_text_similarity::{CardSimilarityIndex, InMemoryRepository, SimilarityConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // card database
    let repository = InMemoryRepository::from_json_str(
        r#"{
            "Giant Growth": {"text": "Target creature gets +3/+3 until end of turn.", "printings": ["LEA"]},
            "Brute Force": {"text": "Target creature gets +3/+3 until end of turn.", "printings": ["PLC"]},
            "Titanic Growth": {"text": "Target creature gets +4/+4 until end of turn.", "printings": ["M12"]},
            "Shock": {"text": "Shock deals 2 damage to any target.", "printings": ["M19"]},
            "Llanowar Elves": {"text": "{T}: Add {G}.", "types": ["Creature"], "printings": ["M19"]},
            "Look at Me, I'm the DCI": {"text": "Ban a card.", "printings": ["UNH"]}
        }"#,
    )?;

    // build corpus and fit the model
    let index = CardSimilarityIndex::build(&repository, &SimilarityConfig::default())?;
    println!("corpus: {} cards, vocabulary: {} terms", index.corpus().len(), index.model().vocabulary_len());

    // query by card name
    let hits = index.by_card_name(&repository, "Giant Growth", 3)?;
    println!("Similar to Giant Growth:\n{}", hits);

    // query by free text
    let hits = index.by_text("deal damage to target creature", 2)?;
    println!("Free text:\n{}", hits);
    println!("{:#?}", hits);

    // why Shock matched
    for (term, weight) in index.explain("deal damage to target creature", "Shock", 3) {
        println!("{term}\t{weight:.4}");
    }
    Ok(())
}
