/// End-to-end dataset generation tests

use std::collections::HashSet;
use std::fs;
use rand::rngs::StdRng;
use rand::SeedableRng;
use treasury_datagen::config::{INQUIRIES_FILE, MARKET_DATA_FILE, PRICES_FILE, TRADES_FILE};
use treasury_datagen::reader::{self, read_each};
use treasury_datagen::{
    generate_all, generate_inquiries, generate_market_data, generate_prices, generate_trades,
    Book, GeneratorConfig, MarketDataRecord, PriceRecord, Side, PRODUCT_IDS,
};

fn small_config(dir: &std::path::Path) -> GeneratorConfig {
    GeneratorConfig::new()
        .with_output_dir(dir)
        .with_tick_rows(50)
}

#[test]
fn test_trades_cycles() {
    let dir = tempfile::tempdir().unwrap();
    let config = small_config(dir.path());
    let mut rng = StdRng::seed_from_u64(1);

    let summary = generate_trades(&config, &mut rng).unwrap();
    assert_eq!(summary.stats.total_rows(), 60);

    let trades = reader::read_trades(&dir.path().join(TRADES_FILE)).unwrap();
    assert_eq!(trades.len(), 60);

    let books = [Book::Trsy1, Book::Trsy2, Book::Trsy3];
    let quantities = [1_000_000u64, 2_000_000, 3_000_000, 4_000_000, 5_000_000];
    for (i, trade) in trades.iter().enumerate() {
        assert_eq!(trade.product_id, PRODUCT_IDS[i / 10]);
        assert_eq!(trade.side as usize, i % 2);
        assert_eq!(trade.book, books[i % 3]);
        assert_eq!(trade.quantity, quantities[i % 5]);
        assert_eq!(trade.price, if i % 2 == 0 { 99.0 } else { 100.0 });
    }

    let ids: HashSet<&str> = trades.iter().map(|t| t.trade_id.as_str()).collect();
    assert_eq!(ids.len(), 60);
}

#[test]
fn test_trades_file_layout() {
    let dir = tempfile::tempdir().unwrap();
    let config = small_config(dir.path());
    let mut rng = StdRng::seed_from_u64(2);
    generate_trades(&config, &mut rng).unwrap();

    let text = fs::read_to_string(dir.path().join(TRADES_FILE)).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("ProductId,TradeId,Price,Book,Quantity,Side"));

    let first: Vec<&str> = lines.next().unwrap().split(',').collect();
    assert_eq!(first[0], "9128283H1");
    assert_eq!(first[1].len(), 8);
    assert_eq!(&first[2..], &["99.0", "TRSY1", "1000000", "0"]);
    assert!(!text.contains('\r'));
    assert!(text.ends_with('\n'));
}

#[test]
fn test_inquiries_cycles() {
    let dir = tempfile::tempdir().unwrap();
    let config = small_config(dir.path());
    let mut rng = StdRng::seed_from_u64(3);
    generate_inquiries(&config, &mut rng).unwrap();

    let text = fs::read_to_string(dir.path().join(INQUIRIES_FILE)).unwrap();
    assert_eq!(text.lines().next(), Some("ProductId,InquiryId,Side,Quantity"));

    let inquiries = reader::read_inquiries(&dir.path().join(INQUIRIES_FILE)).unwrap();
    assert_eq!(inquiries.len(), 60);
    for (i, inquiry) in inquiries.iter().enumerate() {
        let expected_side = if i % 2 == 0 { Side::Buy } else { Side::Sell };
        assert_eq!(inquiry.side, expected_side);
        assert_eq!(inquiry.quantity, (i as u64 % 5 + 1) * 1_000_000);
    }

    let ids: HashSet<&str> = inquiries.iter().map(|q| q.inquiry_id.as_str()).collect();
    assert_eq!(ids.len(), 60);
}

#[test]
fn test_prices_rows() {
    let dir = tempfile::tempdir().unwrap();
    let config = small_config(dir.path());
    let mut rng = StdRng::seed_from_u64(4);
    generate_prices(&config, &mut rng).unwrap();

    let text = fs::read_to_string(dir.path().join(PRICES_FILE)).unwrap();
    assert_eq!(text.lines().next(), Some("ProductId,Mid,Spread"));
    assert_eq!(text.lines().count(), 1 + 6 * 50);

    let prices = reader::read_prices(&dir.path().join(PRICES_FILE)).unwrap();
    assert_eq!(prices.len(), 6 * 50);
    for row in &prices {
        assert!(row.mid.whole() == 99 || row.mid.whole() == 100);
        assert!(row.spread.to_string() == "0-002" || row.spread.to_string() == "0-003");
    }
}

#[test]
fn test_market_data_state_spans_products() {
    let dir = tempfile::tempdir().unwrap();
    let config = GeneratorConfig::new()
        .with_output_dir(dir.path())
        .with_tick_rows(3);
    let mut rng = StdRng::seed_from_u64(5);
    generate_market_data(&config, &mut rng).unwrap();

    let text = fs::read_to_string(dir.path().join(MARKET_DATA_FILE)).unwrap();
    assert_eq!(
        text.lines().next(),
        Some("ProductId,BidPrice1,BidVolume1,...,OfferPrice5,OfferVolume5")
    );

    let snapshots = reader::read_market_data(&dir.path().join(MARKET_DATA_FILE)).unwrap();
    assert_eq!(snapshots.len(), 18);

    // spread wave continues across identifiers: 2,4,6,8,6,4,2,...
    let wave = [2u32, 4, 6, 8, 6, 4];
    for (i, snap) in snapshots.iter().enumerate() {
        assert_eq!(snap.product_id, PRODUCT_IDS[i / 3]);
        assert_eq!(snap.spread_ticks(), wave[i % 6]);

        // ten volumes per row keep the five-value pool aligned at 10e6
        assert_eq!(snap.bids[0].volume, 10_000_000);
        assert_eq!(snap.offers[4].volume, 50_000_000);

        for k in 1..5 {
            assert_eq!(snap.bids[k - 1].price.to_ticks() - snap.bids[k].price.to_ticks(), 1);
            assert_eq!(snap.offers[k].price.to_ticks() - snap.offers[k - 1].price.to_ticks(), 1);
        }
    }
}

#[test]
fn test_generate_all_full_size() {
    let dir = tempfile::tempdir().unwrap();
    let config = GeneratorConfig::new().with_output_dir(dir.path());
    let mut rng = StdRng::seed_from_u64(6);

    let mut confirmations = Vec::new();
    generate_all(&config, &mut rng, |s| confirmations.push(format!("Generated {}", s.file))).unwrap();
    assert_eq!(
        confirmations,
        vec![
            "Generated trades.csv",
            "Generated inquiries.csv",
            "Generated prices.csv",
            "Generated marketdata.csv",
        ]
    );

    let prices = read_each(&dir.path().join(PRICES_FILE), |_: PriceRecord| {}).unwrap();
    assert_eq!(prices, 600_000);

    let mut max_spread = 0u32;
    let snapshots = read_each(&dir.path().join(MARKET_DATA_FILE), |snap: MarketDataRecord| {
        max_spread = max_spread.max(snap.spread_ticks());
    })
    .unwrap();
    assert_eq!(snapshots, 600_000);
    assert_eq!(max_spread, 8);
}

#[test]
fn test_rerun_overwrites_and_keeps_cycles() {
    let dir = tempfile::tempdir().unwrap();
    let config = small_config(dir.path());

    generate_trades(&config, &mut StdRng::seed_from_u64(7)).unwrap();
    let first = reader::read_trades(&dir.path().join(TRADES_FILE)).unwrap();
    generate_trades(&config, &mut StdRng::seed_from_u64(8)).unwrap();
    let second = reader::read_trades(&dir.path().join(TRADES_FILE)).unwrap();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!((a.book, a.quantity, a.side), (b.book, b.quantity, b.side));
        assert_eq!(a.price, b.price);
        assert_ne!(a.trade_id, b.trade_id);
    }
}

#[test]
fn test_missing_output_dir_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = small_config(&dir.path().join("missing"));
    let mut rng = StdRng::seed_from_u64(9);
    assert!(generate_trades(&config, &mut rng).is_err());
}
