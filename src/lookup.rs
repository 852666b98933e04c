//! Local calorie lookup (kcal per 100g or per typical unit).
//!
//! Resolution order: exact normalized match, substring match in either
//! direction, then a category-based estimate. Results are cached per
//! normalized name for the lifetime of the owning tracker session.

use std::collections::HashMap;

/// Fallback when no table entry or category keyword matches.
pub const DEFAULT_CALORIES: f64 = 100.0;

const FOOD_TABLE: &[(&str, f64)] = &[
    // Frutas
    ("maçã", 52.0),
    ("banana", 89.0),
    ("laranja", 47.0),
    ("pêra", 57.0),
    ("uva", 62.0),
    ("morango", 32.0),
    ("abacaxi", 50.0),
    ("manga", 60.0),
    ("kiwi", 61.0),
    ("melancia", 30.0),
    ("melão", 34.0),
    ("limão", 29.0),
    ("coco", 354.0),
    ("abacate", 160.0),
    ("goiaba", 68.0),
    // Vegetais
    ("brócolis", 34.0),
    ("cenoura", 41.0),
    ("tomate", 18.0),
    ("alface", 15.0),
    ("pepino", 16.0),
    ("cebola", 40.0),
    ("batata", 77.0),
    ("batata doce", 86.0),
    ("abobrinha", 17.0),
    ("berinjela", 25.0),
    ("couve", 49.0),
    ("espinafre", 23.0),
    ("repolho", 25.0),
    ("beterraba", 43.0),
    ("couve-flor", 25.0),
    // Grãos e cereais
    ("arroz", 130.0),
    ("arroz integral", 111.0),
    ("macarrão", 131.0),
    ("pão", 265.0),
    ("pão integral", 247.0),
    ("aveia", 389.0),
    ("quinoa", 368.0),
    ("feijão", 127.0),
    ("lentilha", 116.0),
    ("grão de bico", 164.0),
    ("milho", 86.0),
    // Proteínas
    ("peito de frango", 165.0),
    ("carne bovina", 250.0),
    ("peixe", 206.0),
    ("salmão", 208.0),
    ("ovo", 155.0),
    ("clara de ovo", 52.0),
    ("tofu", 76.0),
    ("queijo", 113.0),
    ("iogurte", 59.0),
    ("leite", 42.0),
    ("atum", 144.0),
    ("camarão", 99.0),
    ("frango", 239.0),
    ("peru", 135.0),
    ("porco", 242.0),
    // Nozes e sementes
    ("castanha", 656.0),
    ("amendoim", 567.0),
    ("amêndoa", 579.0),
    ("nozes", 654.0),
    ("chia", 486.0),
    ("linhaça", 534.0),
    // Laticínios
    ("queijo mussarela", 280.0),
    ("iogurte grego", 59.0),
    ("manteiga", 717.0),
    // Lanches e processados
    ("pizza", 266.0),
    ("hambúrguer", 295.0),
    ("batata frita", 365.0),
    ("chocolate", 546.0),
    ("sorvete", 207.0),
    ("biscoito", 502.0),
    ("bolo", 257.0),
    // Bebidas
    ("refrigerante", 42.0),
    ("suco de laranja", 45.0),
    ("café", 2.0),
    ("chá", 1.0),
    ("água", 0.0),
    ("cerveja", 43.0),
    ("vinho", 83.0),
    ("água de coco", 19.0),
    // Temperos e condimentos
    ("azeite", 884.0),
    ("óleo", 884.0),
    ("açúcar", 387.0),
    ("mel", 304.0),
    ("maionese", 680.0),
    // Pratos típicos
    ("feijoada", 150.0),
    ("brigadeiro", 150.0),
    ("coxinha", 250.0),
    ("pastel", 300.0),
    ("açaí", 58.0),
    ("tapioca", 98.0),
    ("farofa", 364.0),
];

const CATEGORY_ESTIMATES: &[(&[&str], f64)] = &[
    (&["fruta", "suco natural"], 50.0),
    (&["vegetal", "salada", "verdura"], 25.0),
    (&["carne", "frango", "peixe", "proteína"], 200.0),
    (&["arroz", "massa", "pão", "carboidrato"], 150.0),
    (&["doce", "chocolate", "bolo"], 300.0),
    (&["bebida", "suco"], 40.0),
];

/// Calorie lookup with a session cache. Owned by the tracker and cleared
/// on reset, rather than living at module scope.
#[derive(Debug, Default)]
pub struct CalorieLookup {
    cache: HashMap<String, f64>,
}

impl CalorieLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves an estimated calorie count for a food name. Deterministic
    /// and total; unknown names resolve to a category estimate or
    /// [`DEFAULT_CALORIES`].
    pub fn search(&mut self, name: &str) -> f64 {
        let normalized = name.trim().to_lowercase();

        if let Some(&cached) = self.cache.get(&normalized) {
            return cached;
        }

        let calories = Self::resolve(&normalized);
        self.cache.insert(normalized, calories);
        calories
    }

    fn resolve(normalized: &str) -> f64 {
        if let Some(&(_, calories)) = FOOD_TABLE.iter().find(|(food, _)| *food == normalized) {
            return calories;
        }

        if let Some(&(_, calories)) = FOOD_TABLE
            .iter()
            .find(|(food, _)| normalized.contains(food) || food.contains(normalized))
        {
            return calories;
        }

        for (keywords, estimate) in CATEGORY_ESTIMATES {
            if keywords.iter().any(|k| normalized.contains(k)) {
                return *estimate;
            }
        }

        DEFAULT_CALORIES
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Drops every cached result (logout/reset).
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        let mut lookup = CalorieLookup::new();
        assert_eq!(lookup.search("maçã"), 52.0);
        assert_eq!(lookup.search("Banana"), 89.0);
    }

    #[test]
    fn test_normalization_trims_and_lowercases() {
        let mut lookup = CalorieLookup::new();
        assert_eq!(lookup.search("  ARROZ  "), 130.0);
    }

    #[test]
    fn test_substring_match() {
        let mut lookup = CalorieLookup::new();
        // "salmão grelhado" contains "salmão"
        assert_eq!(lookup.search("salmão grelhado"), 208.0);
    }

    #[test]
    fn test_category_estimate() {
        let mut lookup = CalorieLookup::new();
        assert_eq!(lookup.search("espetinho de carne exótica"), 200.0);
        assert_eq!(lookup.search("doce de abóbora caseiro"), 300.0);
    }

    #[test]
    fn test_unknown_name_uses_default_and_caches() {
        let mut lookup = CalorieLookup::new();
        assert_eq!(lookup.search("xyz123"), DEFAULT_CALORIES);
        assert_eq!(lookup.cached_len(), 1);
        // Second call hits the cache for the same normalized name.
        assert_eq!(lookup.search("  XYZ123 "), DEFAULT_CALORIES);
        assert_eq!(lookup.cached_len(), 1);
    }

    #[test]
    fn test_clear_empties_cache() {
        let mut lookup = CalorieLookup::new();
        lookup.search("maçã");
        lookup.search("xyz");
        assert_eq!(lookup.cached_len(), 2);
        lookup.clear();
        assert_eq!(lookup.cached_len(), 0);
    }
}
