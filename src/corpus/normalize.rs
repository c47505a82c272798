/// Separator between the halves of a split card name ("Fire // Ice")
pub const NAME_SEPARATOR: &str = " // ";

/// Characters carrying no game meaning
///
/// `{ } / + -` are kept: they spell mana and ability costs, power/toughness
/// and stat modifiers.
#[inline]
pub fn is_stripped_char(c: char) -> bool {
    matches!(
        c,
        '"' | '\u{201c}' | '\u{201d}' | '\u{2018}' | '\u{2019}'
            | '(' | ')' | ',' | '.' | ':' | ';'
            | '<' | '>' | '='
            | '&' | '\'' | '[' | ']' | '^' | '_' | '`' | '|' | '~'
            | '%' | '#' | '$' | '@' | '!' | '?'
    )
}

/// Normalize a card's rules text
///
/// Removes every exact occurrence of the card's own name (each half of a
/// split name separately), then lowercases, then drops stripped punctuation.
/// Name removal runs first because it matches the display-cased name.
///
/// # Arguments
/// * `text` - raw rules text
/// * `card_name` - card name, possibly `"A // B"`; empty for free text
///
/// # Returns
/// * `String` - normalized text
pub fn normalize(text: &str, card_name: &str) -> String {
    let mut without_name = text.to_string();
    for sub_name in card_name.split(NAME_SEPARATOR).filter(|s| !s.is_empty()) {
        without_name = without_name.replace(sub_name, "");
    }
    without_name
        .to_lowercase()
        .chars()
        .filter(|c| !is_stripped_char(*c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_cost_symbols() {
        assert_eq!(normalize("{T}: Add {W}.", ""), "{t} add {w}");
    }

    #[test]
    fn keeps_stat_modifiers() {
        assert_eq!(
            normalize("Target creature gets +3/+3 until end of turn.", ""),
            "target creature gets +3/+3 until end of turn"
        );
        assert_eq!(
            normalize("Put a -1/-1 counter on target creature.", ""),
            "put a -1/-1 counter on target creature"
        );
    }

    #[test]
    fn strips_own_name_before_lowercasing() {
        assert_eq!(
            normalize("Sacrifice Lotus Petal: Add one mana of any color.", "Lotus Petal"),
            "sacrifice  add one mana of any color"
        );
        // lowercase mention is not the display-cased name and stays
        assert_eq!(normalize("lotus petal", "Lotus Petal"), "lotus petal");
    }

    #[test]
    fn strips_every_half_of_a_split_name() {
        let text = "Fire deals 2 damage. Ice taps target permanent. Fire again.";
        assert_eq!(
            normalize(text, "Fire // Ice"),
            " deals 2 damage  taps target permanent  again"
        );
    }

    #[test]
    fn strips_listed_punctuation() {
        assert_eq!(
            normalize("\u{201c}Hi!\u{201d} (x) [y] a=b; c<d>e & f'g ^_`|~%#$@?", ""),
            "hi x y ab cde  fg "
        );
    }

    #[test]
    fn normalizing_twice_changes_nothing() {
        let once = normalize("When Siege Rhino enters, each opponent loses 3 life.", "Siege Rhino");
        assert_eq!(normalize(&once, ""), once);
    }
}
