use crate::core::{is_valid_discount, OrderDiscount, VoucherStore, MIN_ORDER_AMOUNT};
use crate::utils::error::{Result, VoucherError};

pub struct VoucherService<S: VoucherStore> {
    store: S,
}

impl<S: VoucherStore> VoucherService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates a voucher after checking the code is free and the discount is in range.
    ///
    /// A duplicate code is reported before an invalid discount.
    pub async fn create_voucher(&self, code: &str, discount: f64) -> Result<()> {
        tracing::debug!("Looking up voucher code: {}", code);
        if self.store.get_voucher_by_code(code).await?.is_some() {
            tracing::debug!("Rejecting create for {}: code already taken", code);
            return Err(VoucherError::already_exists());
        }

        if !is_valid_discount(discount) {
            tracing::debug!(
                "Rejecting create for {}: discount {} out of range",
                code,
                discount
            );
            return Err(VoucherError::invalid_discount());
        }

        self.store.create_voucher(code, discount).await?;
        tracing::info!("Created voucher {} ({}% off)", code, discount);
        Ok(())
    }

    /// Applies the voucher to an order amount.
    ///
    /// The voucher is consumed only when it is unused and the amount reaches
    /// `MIN_ORDER_AMOUNT`; otherwise the amount is returned unchanged.
    pub async fn apply_voucher(&self, code: &str, amount: f64) -> Result<OrderDiscount> {
        tracing::debug!("Looking up voucher code: {}", code);
        let voucher = self
            .store
            .get_voucher_by_code(code)
            .await?
            .ok_or_else(VoucherError::does_not_exist)?;

        if voucher.used {
            tracing::debug!("Voucher {} already used, not applying", code);
            return Ok(OrderDiscount::not_applied(amount, voucher.discount));
        }

        // A NaN amount never compares >= and falls through unapplied.
        if amount >= MIN_ORDER_AMOUNT {
            match self.store.use_voucher(voucher.id).await {
                Ok(()) => {
                    let order = OrderDiscount::applied(amount, voucher.discount);
                    tracing::info!(
                        "Applied voucher {}: {} -> {}",
                        code,
                        order.amount,
                        order.final_amount
                    );
                    return Ok(order);
                }
                Err(VoucherError::AlreadyUsed { .. }) => {
                    tracing::debug!("Voucher {} was used concurrently, not applying", code);
                    return Ok(OrderDiscount::not_applied(amount, voucher.discount));
                }
                Err(e) => return Err(e),
            }
        }

        tracing::debug!(
            "Order amount {} below {}, voucher {} left unused",
            amount,
            MIN_ORDER_AMOUNT,
            code
        );
        Ok(OrderDiscount::not_applied(amount, voucher.discount))
    }
}
