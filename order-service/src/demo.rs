//! Demo catalog for local runs

use common::decimal::dec;
use common::error::Result;
use common::model::{Product, User, Voucher};
use tracing::info;

use crate::service::OrderService;

/// Records created by [`seed`]
#[derive(Debug, Clone)]
pub struct DemoData {
    pub user: User,
    pub products: Vec<Product>,
    pub voucher: Voucher,
}

/// Insert a user, two products and a voucher to try the API against
pub async fn seed(service: &OrderService) -> Result<DemoData> {
    let user = service
        .add_user(User::new("Nguyễn Văn A".to_string(), "a.nguyen@example.com".to_string()))
        .await?;
    let shirt = service
        .add_product(Product::new("Áo thun".to_string(), dec!(150000)))
        .await?;
    let jeans = service
        .add_product(Product::new("Quần jean".to_string(), dec!(420000)))
        .await?;
    let voucher = service
        .add_voucher(Voucher::new("GIAM10".to_string(), dec!(10000), 100))
        .await?;

    info!(
        "Demo data: user {}, products {} and {}, voucher {}",
        user.id, shirt.id, jeans.id, voucher.id
    );

    Ok(DemoData {
        user,
        products: vec![shirt, jeans],
        voucher,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seed_creates_linked_records() {
        let service = OrderService::new();
        let demo = seed(&service).await.unwrap();

        assert!(service.get_user(demo.user.id).await.unwrap().is_some());
        assert_eq!(service.get_voucher(demo.voucher.id).await.unwrap().unwrap().limit, 100);
        assert_eq!(demo.products.len(), 2);
    }
}
