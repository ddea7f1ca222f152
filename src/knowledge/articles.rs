//! Built-in articles shipped with the app.

use uuid::Uuid;

use super::model::{Article, ArticleCategory, Difficulty};

/// Namespace for built-in article ids. Ids derive from titles, so they are
/// the same on every launch.
const ARTICLE_NAMESPACE: Uuid = Uuid::from_u128(0x6a1c_52e0_8d0b_4f0e_9a57_3c21_b4d6_e801);

fn builtin(
    title: &str,
    content: &str,
    category: ArticleCategory,
    difficulty: Difficulty,
) -> Article {
    Article {
        id: Uuid::new_v5(&ARTICLE_NAMESPACE, title.as_bytes()),
        title: title.to_string(),
        content: content.to_string(),
        category,
        difficulty,
    }
}

pub fn default_articles() -> Vec<Article> {
    vec![
        builtin(
            "How to Determine Your Skin Type",
            "There are five main skin types. Dry skin feels tight, may flake, and \
             its pores are barely visible. Oily skin shines, shows enlarged pores, \
             and is prone to blackheads. Combination skin has an oily T-zone with \
             dry cheeks. Normal skin is balanced. Sensitive skin reddens and reacts \
             to new products. Check in the morning on clean skin without makeup.",
            ArticleCategory::Basics,
            Difficulty::Beginner,
        ),
        builtin(
            "Key Skincare Ingredients",
            "Hyaluronic acid draws in and holds moisture. Retinol speeds up cell \
             renewal and softens wrinkles; start with a low concentration. \
             Niacinamide calms inflammation and tightens pores. Vitamin C is an \
             antioxidant that evens pigmentation and belongs in the morning. \
             Salicylic acid (BHA) clears pores. Glycolic acid (AHA) smooths texture. \
             Peptides support collagen.",
            ArticleCategory::Ingredients,
            Difficulty::Beginner,
        ),
        builtin(
            "Morning vs Evening Routine",
            "Mornings protect: gentle cleanser, toner, vitamin C serum, \
             moisturizer, and sunscreen, which is never optional. Evenings repair: \
             double cleansing if you wore makeup, toner, treatment serums such as \
             retinol or acids, a richer moisturizer, and an optional mask.",
            ArticleCategory::Routines,
            Difficulty::Intermediate,
        ),
        builtin(
            "How to Fight Acne",
            "Cleanse gently with salicylic acid or benzoyl peroxide and skip harsh \
             scrubs. Treat with 2% BHA daily, add retinol slowly, and use \
             niacinamide against redness. Keep moisturizing with a light \
             non-comedogenic cream. Wear sunscreen, since many acne treatments make \
             skin sun-sensitive. Expect results after four to six weeks.",
            ArticleCategory::Problems,
            Difficulty::Intermediate,
        ),
        builtin(
            "Skincare Myths",
            "Oily skin still needs moisture; dehydrated skin produces more sebum. \
             Price says little about quality. Natural ingredients can irritate too. \
             A product that works does not need replacing every few months. More \
             steps are not better. SPF matters all year, not only in summer.",
            ArticleCategory::Myths,
            Difficulty::Beginner,
        ),
    ]
}
