use std::fs;
use std::path::{Path, PathBuf};

use caufi_catalog::Product;
use caufi_pdp::commands::{cart, matrix, view};
use caufi_pdp::config::PdpConfig;
use serde_json::{Value, json};

fn batik_shirt() -> Value {
    json!({
        "id": 12,
        "name": "Batik Parang Shirt",
        "slug": "batik-parang-shirt",
        "category": "Men",
        "manufacturer": "Caufi",
        "motif": "Parang",
        "images": [
            { "imageUrl": "https://cdn.example/batik-back.webp", "position": 1 },
            { "imageUrl": "https://cdn.example/batik-front.webp", "position": 0 }
        ],
        "variants": [
            { "id": 101, "color": "Red", "hex": "#b91c1c", "size": "S", "stock": 0,
              "regularPrice": "350000", "discountPrice": "299000", "sku": "BTK-RED-S" },
            { "id": 102, "color": "Red", "hex": "#b91c1c", "size": "M", "stock": 5,
              "regularPrice": "350000", "discountPrice": "299000", "sku": "BTK-RED-M" },
            { "id": 103, "color": "Red", "hex": "#b91c1c", "size": "L", "stock": 2,
              "regularPrice": "375000", "sku": "BTK-RED-L" },
            { "id": 104, "color": "Indigo", "hex": "#3730a3", "size": "M", "stock": 1,
              "regularPrice": "350000", "discountPrice": "0", "sku": "BTK-IND-M" },
            { "id": 105, "color": "Indigo", "hex": "#3730a3", "size": "XL", "stock": 0,
              "regularPrice": "390000", "sku": "BTK-IND-XL" }
        ]
    })
}

fn cart_document() -> Value {
    let product = batik_shirt();
    json!({
        "lines": [
            { "productName": "Batik Parang Shirt", "productSlug": "batik-parang-shirt",
              "variant": product["variants"][1], "quantity": 2 },
            { "productName": "Kawung Scarf",
              "variant": { "id": 301, "regularPrice": 120000, "sku": "KWG-SCARF" },
              "quantity": 1 }
        ]
    })
}

fn write_fixture(name: &str, value: &Value) -> PathBuf {
    let path = std::env::temp_dir().join(format!("caufi-pdp-{}-{name}.json", std::process::id()));
    fs::write(&path, serde_json::to_string(value).expect("fixture serializes")).expect("fixture written");
    path
}

fn product() -> Product {
    serde_json::from_value(batik_shirt()).expect("valid product payload")
}

#[test]
fn view_human_output_shows_selected_variant() {
    let product = product();
    let config = PdpConfig::default();
    let report = view::build_report(&product, Some("red"), Some("M"), &config);
    let output = view::render_human(&report, &config);

    assert!(output.starts_with("Batik Parang Shirt (batik-parang-shirt)\n"));
    assert!(output.contains("Price range: Rp 299.000 - Rp 390.000"));
    assert!(output.contains("Total stock: 8\n"));
    assert!(output.contains("Colors: Red, Indigo"));
    assert!(output.contains("Sizes: L, M, S (unavailable), XL (unavailable)"));
    assert!(output.contains("Selected: Red / M"));
    assert!(output.contains("SKU: BTK-RED-M"));
    assert!(output.contains("Price: Rp 299.000 (was Rp 350.000, -15%)"));
    assert!(output.contains("Stock: 5"));
    assert!(output.ends_with("Add to cart: yes"));
}

#[test]
fn view_ignores_unavailable_size_request() {
    let product = product();
    let config = PdpConfig::default();
    let report = view::build_report(&product, Some("Indigo"), Some("XL"), &config);

    assert_eq!(report.view.selection.selected_color(), Some("Indigo"));
    assert_eq!(report.view.selection.selected_size(), Some("M"));
    assert_eq!(report.display_label.as_deref(), Some("Rp 350.000"));
    assert_eq!(report.strike_label, None);
    assert_eq!(report.primary_image, Some("https://cdn.example/batik-front.webp"));
}

#[test]
fn view_json_output_is_camel_case() {
    let path = write_fixture("view", &batik_shirt());
    let config = PdpConfig { currency: "USD".to_string(), ..PdpConfig::default() };
    let output = view::run(&path, None, None, true, &config).expect("view succeeds");
    let _ = fs::remove_file(&path);

    let payload: Value = serde_json::from_str(&output).expect("json output");
    assert_eq!(payload["slug"], "batik-parang-shirt");
    assert_eq!(payload["view"]["selection"]["selectedColor"], "Red");
    assert_eq!(payload["view"]["selection"]["selectedSize"], "L");
    assert_eq!(payload["view"]["activeVariant"]["sku"], "BTK-RED-L");
    assert_eq!(payload["displayLabel"], "$375,000.00");
    assert_eq!(payload["canAddToCart"], true);
    assert_eq!(payload["totalStock"], 8);
    assert_eq!(payload["purchasable"], true);
}

#[test]
fn view_flags_inactive_product() {
    let mut payload = batik_shirt();
    payload["isActive"] = json!(false);
    let product: Product = serde_json::from_value(payload).expect("valid product payload");
    let config = PdpConfig::default();
    let report = view::build_report(&product, None, None, &config);

    assert!(!report.purchasable);
    assert_eq!(report.total_stock, 8);
    assert!(view::render_human(&report, &config).contains("Product unavailable\n"));
}

#[test]
fn view_reports_missing_file() {
    let error = view::run(Path::new("/nonexistent/caufi/product.json"), None, None, false, &PdpConfig::default())
        .expect_err("missing file");
    assert!(format!("{error:#}").contains("failed to read /nonexistent/caufi/product.json"));
}

#[test]
fn cart_human_output_lists_lines_and_totals() {
    let path = write_fixture("cart-human", &cart_document());
    let output = cart::run(&path, false, &PdpConfig::default()).expect("cart succeeds");
    let _ = fs::remove_file(&path);

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Batik Parang Shirt x2 [BTK-RED-M] Red • Size M: Rp 598.000 (save Rp 102.000) - only 3 more available",
            "Kawung Scarf x1 [KWG-SCARF]: Rp 120.000",
            "Items: 3",
            "Subtotal: Rp 718.000",
            "You save: Rp 102.000",
            "Shipping: Free",
            "Total: Rp 718.000",
        ]
    );
}

#[test]
fn cart_json_output_carries_summary_and_hints() {
    let path = write_fixture("cart-json", &cart_document()["lines"]);
    let config = PdpConfig { low_stock_threshold: 1, ..PdpConfig::default() };
    let output = cart::run(&path, true, &config).expect("cart succeeds");
    let _ = fs::remove_file(&path);

    let payload: Value = serde_json::from_str(&output).expect("json output");
    assert_eq!(payload["currency"], "IDR");
    assert_eq!(payload["summary"]["totalItems"], 3);
    assert_eq!(payload["summary"]["subtotal"], 718000.0);
    assert_eq!(payload["summary"]["hasSavings"], true);
    assert_eq!(payload["lines"][0]["stockHint"]["status"], "available");
    assert_eq!(payload["lines"][1]["pricing"]["lineTotal"], 120000.0);
}

#[test]
fn cart_rejects_quantity_over_stock() {
    let mut document = cart_document();
    document["lines"][0]["quantity"] = json!(9);
    let path = write_fixture("cart-over-stock", &document);
    let error = cart::run(&path, false, &PdpConfig::default()).expect_err("over stock");
    let _ = fs::remove_file(&path);

    let message = format!("{error:#}");
    assert!(message.contains("invalid cart"));
    assert!(message.contains("only 5 left in stock for BTK-RED-M"));
}

#[test]
fn empty_cart_renders_zero_totals() {
    let report = cart::build_report(&caufi_cart::Cart::new(), &PdpConfig::default());
    assert_eq!(
        cart::render_human(&report),
        "Cart is empty\nItems: 0\nSubtotal: Rp 0\nShipping: Free\nTotal: Rp 0"
    );
}

#[test]
fn matrix_keeps_existing_variants_and_drafts_new_ones() {
    let path = write_fixture("matrix", &batik_shirt());
    let output = matrix::run(
        &path,
        &["Red=#ff0000".to_string()],
        &["M".to_string(), " XXL ".to_string()],
    )
    .expect("matrix succeeds");
    let _ = fs::remove_file(&path);

    let variants: Value = serde_json::from_str(&output).expect("json output");
    let variants = variants.as_array().expect("array");
    assert_eq!(variants.len(), 2);

    assert_eq!(variants[0]["id"], 102);
    assert_eq!(variants[0]["hex"], "#ff0000");
    assert_eq!(variants[0]["stock"], 5);
    assert_eq!(variants[0]["sku"], "BTK-RED-M");

    assert_eq!(variants[1]["id"], 0);
    assert_eq!(variants[1]["size"], "XXL");
    assert_eq!(variants[1]["regularPrice"], "0");
    assert_eq!(variants[1]["sku"], "SKU-RED-XXL");
}

#[test]
fn matrix_rejects_malformed_color() {
    let path = write_fixture("matrix-bad", &batik_shirt());
    let error = matrix::run(&path, &["Red".to_string()], &[]).expect_err("bad color");
    let _ = fs::remove_file(&path);
    assert!(error.to_string().contains("NAME=HEX"));
}
