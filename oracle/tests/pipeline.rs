// BSD 3-Clause License
//
// Copyright (c) 2025, BlackPortal ○
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice, this
//    list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
//    this list of conditions and the following disclaimer in the documentation
//    and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its
//    contributors may be used to endorse or promote products derived from
//    this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
// DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
// FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
// DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
// SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
// CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
// OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

use std::io::Write;

use profit_oracle::data::{
    DataError, ExtensionError, RetailDatasets, SourceFile, ValidationConfig, Value,
    check_unique_column, process_customer_file, process_product_file, process_sales_file,
    remove_empty,
};
use profit_oracle::errors::ModelError;
use profit_oracle::prediction::predict_quantity_sold;
use tempfile::{Builder, NamedTempFile};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn temp_file(suffix: &str, content: &[u8]) -> NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().expect("Failed to create temp file");
    file.write_all(content).expect("Failed to write to temp file");
    file
}

const PRODUCTS: &str = "PID,Product_Name,Unit_Price\nP1,Lamp,12.5\nP2,Desk,\nP3,Chair,40\n";

const SALES: &str = "SID,CID,PID,Sales_Price,Quantity_Sold\n\
S1,C1,P1,10,80\n\
S2,,P1,20,60\n\
S3,C2,P3,30,40\n\
S4,NA,P3,40,20\n\
S5,C1,,50,0\n";

const CUSTOMERS: &str = "CID,Name,Age,Gender\n\
C1,Ana,34,Female\n\
C2,Bo,-1,Male\n\
C3,Cy,130,Female\n\
C4,Di,51,Robot\n\
C5,Ed,27,Trans\n";

#[test]
fn test_full_pipeline_from_disk() {
    init_logger();
    let products = temp_file(".csv", PRODUCTS.as_bytes());
    let sales = temp_file(".CSV", SALES.as_bytes());
    let customers = temp_file(".csv", CUSTOMERS.as_bytes());

    let datasets = RetailDatasets::load(
        Some(&SourceFile::from_path(products.path())),
        Some(&SourceFile::from_path(sales.path())),
        Some(&SourceFile::from_path(customers.path())),
        &ValidationConfig::default(),
    )
    .expect("Pipeline failed");

    assert_eq!(datasets.products.len(), 2);

    // S2 and S4 get the sentinel, S5 is dropped for its missing PID
    assert_eq!(datasets.sales.len(), 4);
    assert_eq!(datasets.sales.get(1, "CID"), Some(&Value::from("0")));
    assert_eq!(datasets.sales.get(3, "CID"), Some(&Value::from("0")));

    let cids: Vec<String> = datasets
        .customers
        .column("CID")
        .expect("CID column")
        .values()
        .map(|v| v.to_string())
        .collect();
    assert_eq!(cids, ["C1", "C5"]);

    let model = predict_quantity_sold(&datasets.sales).expect("Fit failed");
    assert!((model.weight + 2.0).abs() < 1e-2, "weight = {}", model.weight);
    assert!((model.bias - 100.0).abs() < 0.5, "bias = {}", model.bias);
}

#[test]
fn test_cleaning_is_idempotent() {
    init_logger();
    let file = SourceFile::from_bytes("customers.csv", CUSTOMERS.as_bytes().to_vec());
    let config = ValidationConfig::default();
    let once = process_customer_file(Some(&file), &config).unwrap();
    let twice = remove_empty(&once);
    assert_eq!(once, twice);
    assert!(check_unique_column(&once, "CID").is_ok());
}

#[test]
fn test_extension_gate() {
    let config = ValidationConfig::default();
    let file = SourceFile::from_bytes("report.pdf", b"PID\nP1\n".to_vec());
    let err = process_product_file(Some(&file), &config).unwrap_err();
    assert!(matches!(err, DataError::InvalidFileExtension(ExtensionError::Unsupported { .. })));

    let err = process_sales_file(None, &config).unwrap_err();
    assert!(matches!(err, DataError::InvalidFileExtension(ExtensionError::NoFile)));
}

#[test]
fn test_duplicate_product_key_is_named() {
    let file = temp_file(".csv", b"PID,Product_Name\nP1,Lamp\nP2,Desk\nP1,Chair\n");
    let source = SourceFile::from_path(file.path());
    let err = process_product_file(Some(&source), &ValidationConfig::default()).unwrap_err();
    match err {
        DataError::DuplicateKey { column, .. } => assert_eq!(column, "PID"),
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(
        DataError::DuplicateKey { column: "PID".into(), value: "P1".into() }
            .to_string()
            .contains("PID")
    );
}

#[test]
fn test_workbook_sales_file() {
    init_logger();
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, name) in ["SID", "CID", "Sales_Price", "Quantity_Sold"].iter().enumerate() {
        sheet.write_string(0, col as u16, *name).unwrap();
    }
    for i in 1..=5u32 {
        let price = 2.0 * i as f64;
        sheet.write_string(i, 0, format!("S{i}")).unwrap();
        if i % 2 == 0 {
            sheet.write_string(i, 1, format!("C{i}")).unwrap();
        }
        sheet.write_number(i, 2, price).unwrap();
        sheet.write_number(i, 3, 3.0 * price + 1.0).unwrap();
    }
    let file = temp_file(".xlsx", &workbook.save_to_buffer().unwrap());

    let sales =
        process_sales_file(Some(&SourceFile::from_path(file.path())), &ValidationConfig::default())
            .unwrap();
    assert_eq!(sales.len(), 5);
    assert_eq!(sales.get(0, "CID"), Some(&Value::from("0")));
    assert_eq!(sales.get(1, "CID"), Some(&Value::from("C2")));

    let model = predict_quantity_sold(&sales).unwrap();
    assert!((model.weight - 3.0).abs() < 1e-2, "weight = {}", model.weight);
    assert!((model.bias - 1.0).abs() < 0.1, "bias = {}", model.bias);
}

#[test]
fn test_prediction_needs_price_column() {
    let file = SourceFile::from_bytes("sales.csv", b"SID,CID\nS1,C1\n".to_vec());
    let sales = process_sales_file(Some(&file), &ValidationConfig::default()).unwrap();
    assert!(matches!(
        predict_quantity_sold(&sales),
        Err(ModelError::Data(DataError::MissingColumn { .. }))
    ));
}

#[test]
fn test_cells_are_typed_per_column() {
    init_logger();
    let products = temp_file(".csv", b"PID,Product_Name\nP1,Lamp\n007,Nan\n7,Chair\n");
    let df = process_product_file(
        Some(&SourceFile::from_path(products.path())),
        &ValidationConfig::default(),
    )
    .expect("Distinct textual keys rejected");
    assert_eq!(df.len(), 3);
    assert_eq!(df.get(1, "PID"), Some(&Value::from("007")));
    assert_eq!(df.get(1, "Product_Name"), Some(&Value::from("Nan")));
}
