use crate::domain::screening::token_set::TokenSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreeningFlags {
    pub is_allergen: bool,
    pub is_contraindication: bool,
}

/// Flags an ingredient whose lowercased name contains any allergen or contraindication token.
pub fn screen(
    ingredient_name: &str,
    allergens: &TokenSet,
    contraindications: &TokenSet,
) -> ScreeningFlags {
    let name = ingredient_name.to_lowercase();

    ScreeningFlags {
        is_allergen: allergens.matches(&name),
        is_contraindication: contraindications.matches(&name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> TokenSet {
        TokenSet::parse(Some(text))
    }

    #[test]
    fn unrelated_tokens_flag_nothing() {
        let allergens = tokens("nuts, dairy");
        let contraindications = TokenSet::default();

        for name in ["Almond milk", "Water", "Peanut butter"] {
            assert_eq!(
                screen(name, &allergens, &contraindications),
                ScreeningFlags::default()
            );
        }
    }

    #[test]
    fn matching_is_case_insensitive() {
        let allergens = tokens("peanut");
        let contraindications = tokens("Sugar");

        for name in ["Peanut butter", "Brown sugar", "water"] {
            assert_eq!(
                screen(name, &allergens, &contraindications),
                screen(&name.to_uppercase(), &allergens, &contraindications)
            );
        }
        assert!(screen("PEANUT BUTTER", &allergens, &contraindications).is_allergen);
    }

    #[test]
    fn an_ingredient_can_be_both() {
        let flags = screen("Salted peanuts", &tokens("peanut"), &tokens("salt"));

        assert!(flags.is_allergen);
        assert!(flags.is_contraindication);
    }

    #[test]
    fn substring_match_is_one_directional() {
        let allergens = tokens("peanuts");

        assert!(!screen("Peanut butter", &allergens, &TokenSet::default()).is_allergen);
        assert!(screen("Eggplant", &tokens("egg"), &TokenSet::default()).is_allergen);
    }
}
