use std::env;

use profit_oracle::{
    data::{RetailDatasets, SourceFile, ValidationConfig},
    prediction::{PRICE_COLUMN, QUANTITY_COLUMN, predict_quantity_sold},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let paths: Vec<String> = env::args().skip(1).collect();
    let [products, sales, customers] = paths.as_slice() else {
        eprintln!("usage: sales_prediction <products> <sales> <customers>");
        std::process::exit(2);
    };

    let products = SourceFile::from_path(products);
    let sales = SourceFile::from_path(sales);
    let customers = SourceFile::from_path(customers);

    let config = ValidationConfig::default();
    let datasets = RetailDatasets::load(Some(&products), Some(&sales), Some(&customers), &config)?;

    println!("Products after cleaning: {} rows", datasets.products.len());
    println!("Sales after cleaning: {} rows", datasets.sales.len());
    println!("Customers after cleaning: {} rows", datasets.customers.len());

    let model = predict_quantity_sold(&datasets.sales)?;
    println!("{} against {}: {}", QUANTITY_COLUMN, PRICE_COLUMN, model);

    for price in [10.0, 50.0, 100.0] {
        println!("Predicted quantity at price {:.2}: {:.2}", price, model.predict(price));
    }

    Ok(())
}
