use shoprag::logging::init_simple_logging;
use shoprag::models::ProductRecord;
use shoprag::search::validate_top_k;
use shoprag::search::FUZZY_WEIGHT;
use shoprag::search::LEXICAL_WEIGHT;
use shoprag::search::SCORE_THRESHOLD;
use shoprag::HybridProductIndex;
use shoprag::Result;
use shoprag::ShopRagError;

fn gift_basket() -> ProductRecord {
    ProductRecord::new("Giỏ Quà Tết Cao Cấp 2025", "quà tết cao cấp")
}

fn storefront() -> HybridProductIndex {
    init_simple_logging();
    HybridProductIndex::build(vec![
        gift_basket().with_field("price", "649,000₫"),
        ProductRecord::new("Bánh Mì Hoa Cúc", "bánh mì mềm thơm bơ").with_field("price", "85,000₫"),
        ProductRecord::new("Cà Phê Rang Xay", "cà phê nguyên chất").with_field("price", "120,000₫"),
        ProductRecord::new("Giỏ Quà Trung Thu", "bánh trung thu và trà"),
        ProductRecord::new("Trà Xanh Thái Nguyên", "trà xanh đặc sản"),
    ])
}

#[test]
fn test_exact_match_scores_near_maximal() -> Result<()> {
    init_simple_logging();
    let index = HybridProductIndex::build(vec![gift_basket()]);
    let results = index.search("Giỏ Quà Tết Cao Cấp 2025", 10)?;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].record.title, "Giỏ Quà Tết Cao Cấp 2025");
    assert!(results[0].score > 0.9);
    Ok(())
}

#[test]
fn test_unrelated_query_returns_nothing() -> Result<()> {
    let index = HybridProductIndex::build(vec![gift_basket()]);
    assert!(index.search("xe đạp thể thao", 10)?.is_empty());
    Ok(())
}

#[test]
fn test_final_score_is_weighted_blend() -> Result<()> {
    // Only "2025" overlaps lexically; the folded title matches exactly
    let index = HybridProductIndex::build(vec![gift_basket()]);
    let query = "gio qua tet cao cap 2025";

    let breakdown = index.explain(query);
    let expected_lexical = (4.0_f64 / 3.0).ln();
    assert!((breakdown[0].lexical - expected_lexical).abs() < 1e-6);
    assert!((breakdown[0].fuzzy - 1.0).abs() < 1e-6);

    let expected = 0.7 * expected_lexical + 0.3;
    assert!((breakdown[0].score - expected).abs() < 1e-6);
    assert!(
        (breakdown[0].score - (LEXICAL_WEIGHT * breakdown[0].lexical + FUZZY_WEIGHT * breakdown[0].fuzzy))
            .abs()
            < 1e-6
    );

    let results = index.search(query, 5)?;
    assert_eq!(results.len(), 1);
    assert!((results[0].score - expected).abs() < 1e-6);
    Ok(())
}

#[test]
fn test_typo_blend_uses_fractional_fuzzy_score() -> Result<()> {
    init_simple_logging();
    let index = HybridProductIndex::build(vec![ProductRecord::new(
        "Bánh Mì Hoa Cúc",
        "bánh mì mềm thơm bơ",
    )]);
    let idf = (4.0_f64 / 3.0).ln();
    // "banh cuk hoa mi" vs "banh cuc hoa mi": one substitution in 15 chars
    let expected_fuzzy = 1.0 - 1.0 / 15.0;

    // Unaccented query: only "hoa" overlaps, so the blend lands below the threshold
    let breakdown = index.explain("banh mi hoa cuk");
    assert!((breakdown[0].lexical - idf).abs() < 1e-6);
    assert!((breakdown[0].fuzzy - expected_fuzzy).abs() < 1e-6);
    let expected = 0.7 * idf + 0.3 * expected_fuzzy;
    assert!((breakdown[0].score - expected).abs() < 1e-6);
    assert!((breakdown[0].score - 0.48138).abs() < 1e-5);
    assert!(index.search("banh mi hoa cuk", 5)?.is_empty());

    // Accented query: "bánh" and "mì" occur twice in the document, "hoa" once
    let breakdown = index.explain("bánh mì hoa cuk");
    let expected_lexical = idf * (2.0 * (2.0 * 2.5 / 3.5) + 1.0);
    assert!((breakdown[0].lexical - expected_lexical).abs() < 1e-6);
    assert!((breakdown[0].fuzzy - expected_fuzzy).abs() < 1e-6);
    let expected = 0.7 * expected_lexical + 0.3 * expected_fuzzy;

    let results = index.search("bánh mì hoa cuk", 5)?;
    assert_eq!(results.len(), 1);
    assert!((results[0].score - expected).abs() < 1e-6);
    Ok(())
}

#[test]
fn test_invalid_top_k() {
    let index = storefront();
    assert!(matches!(
        index.search("giỏ quà", 0),
        Err(ShopRagError::InvalidArgument(_))
    ));
    assert!(matches!(
        validate_top_k(-5),
        Err(ShopRagError::InvalidArgument(_))
    ));
    assert!(matches!(
        validate_top_k(0),
        Err(ShopRagError::InvalidArgument(_))
    ));
    assert_eq!(validate_top_k(3).ok(), Some(3));
}

#[test]
fn test_token_order_and_diacritics_ignored_by_fuzzy_component() {
    let index = HybridProductIndex::build(vec![ProductRecord::new("Bánh Mì", "")]);
    let breakdown = index.explain("mi banh");
    assert!((breakdown[0].fuzzy - 1.0).abs() < 1e-12);
}

#[test]
fn test_search_is_deterministic() -> Result<()> {
    let index = storefront();
    for query in ["giỏ quà", "bánh mì", "trà xanh", "cà phê rang"] {
        let first = serde_json::to_value(index.search(query, 5)?)?;
        let second = serde_json::to_value(index.search(query, 5)?)?;
        assert_eq!(first, second, "query {query:?}");
    }
    Ok(())
}

#[test]
fn test_results_respect_threshold_order_and_bound() -> Result<()> {
    let index = storefront();
    for query in ["giỏ quà", "bánh", "trà", "quà tết cao cấp", "cà phê"] {
        for top_k in [1, 2, 10] {
            let results = index.search(query, top_k)?;
            assert!(results.len() <= top_k);
            assert!(results.iter().all(|r| r.score > SCORE_THRESHOLD));
            assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
        }
    }
    Ok(())
}

#[test]
fn test_results_are_prefix_of_larger_top_k() -> Result<()> {
    let index = storefront();
    let all = index.search("giỏ quà", 10)?;
    let one = index.search("giỏ quà", 1)?;

    assert!(all.len() >= 2);
    assert_eq!(one.len(), 1);
    assert_eq!(one[0].record.title, all[0].record.title);
    Ok(())
}

#[test]
fn test_equal_scores_keep_catalog_order() -> Result<()> {
    let index = HybridProductIndex::build(vec![
        ProductRecord::new("Trà Sen", "hộp 100g").with_field("sku", "first"),
        ProductRecord::new("Trà Sen", "hộp 100g").with_field("sku", "second"),
    ]);
    let results = index.search("trà sen", 10)?;

    assert_eq!(results.len(), 2);
    assert!((results[0].score - results[1].score).abs() < f64::EPSILON);
    assert_eq!(results[0].record.field_str("sku"), Some("first"));
    assert_eq!(results[1].record.field_str("sku"), Some("second"));
    Ok(())
}

#[test]
fn test_empty_catalog_and_empty_query() -> Result<()> {
    let empty = HybridProductIndex::build(Vec::new());
    assert!(empty.is_empty());
    assert!(empty.search("giỏ quà", 5)?.is_empty());

    let index = storefront();
    assert!(index.search("", 5)?.is_empty());
    assert!(index.search("   ", 5)?.is_empty());
    Ok(())
}

#[test]
fn test_results_carry_every_catalog_field() -> Result<()> {
    let index = storefront();
    let results = index.search("bánh mì hoa cúc", 1)?;
    let value = serde_json::to_value(&results[0])?;

    assert_eq!(value["title"], "Bánh Mì Hoa Cúc");
    assert_eq!(value["content"], "bánh mì mềm thơm bơ");
    assert_eq!(value["price"], "85,000₫");
    assert!(value["score"].as_f64().is_some_and(|s| s > SCORE_THRESHOLD));
    Ok(())
}
