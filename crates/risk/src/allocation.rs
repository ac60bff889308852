use crate::error::AllocationError;
use crate::Allocator;
use core_types::{Allocation, Recommendation};
use rust_decimal::Decimal;

/// Linear rank weights: rank 0 of `n` gets `n`, the last rank gets `1`.
pub fn rank_weights(n: usize) -> Result<Vec<u32>, AllocationError> {
    (0..n)
        .map(|i| {
            u32::try_from(n - i).map_err(|_| {
                AllocationError::Calculation(format!("buy list of {} entries is too long", n))
            })
        })
        .collect()
}

/// Allocates the budget in proportion to linear rank weights.
///
/// Deterministic and order-preserving: allocation `i` is
/// `amount * (n - i) / (n * (n + 1) / 2)`. The last allocation absorbs the
/// division remainder so the allocations sum to `amount` exactly.
#[derive(Debug, Clone, Default)]
pub struct RankWeightedAllocator;

impl RankWeightedAllocator {
    pub fn new() -> Self {
        Self
    }
}

impl Allocator for RankWeightedAllocator {
    fn allocate(
        &self,
        buy_list: &[Recommendation],
        amount: Decimal,
    ) -> Result<Vec<Allocation>, AllocationError> {
        // --- 1. Validation ---
        if amount <= Decimal::ZERO {
            return Err(AllocationError::InvalidAmount(amount));
        }
        if buy_list.is_empty() {
            return Ok(Vec::new());
        }

        // --- 2. Weights ---
        let weights = rank_weights(buy_list.len())?;
        let weight_sum: Decimal = weights.iter().map(|w| Decimal::from(*w)).sum();

        // --- 3. Proportional split ---
        let mut allocations = Vec::with_capacity(buy_list.len());
        let mut assigned = Decimal::ZERO;
        let last = buy_list.len() - 1;

        for (rank, (recommendation, weight)) in buy_list.iter().zip(weights).enumerate() {
            let dollar_amount = if rank == last {
                amount - assigned
            } else {
                amount
                    .checked_mul(Decimal::from(weight))
                    .and_then(|scaled| scaled.checked_div(weight_sum))
                    .ok_or_else(|| {
                        AllocationError::Calculation(format!(
                            "allocation overflow for rank {} of amount {}",
                            rank, amount
                        ))
                    })?
            };
            assigned += dollar_amount;

            tracing::debug!(rank, weight, %dollar_amount, ticker = ?recommendation.ticker_symbol, "Allocated.");
            allocations.push(Allocation {
                rank,
                weight,
                company_name: recommendation.company_name.clone(),
                ticker: recommendation.ticker_symbol.clone(),
                dollar_amount,
            });
        }

        Ok(allocations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn buy_list(tickers: &[&str]) -> Vec<Recommendation> {
        tickers
            .iter()
            .map(|t| Recommendation::new(&format!("{} Inc", t), Some(t), "positive coverage"))
            .collect()
    }

    #[test]
    fn test_three_ranks_split_three_two_one() {
        let allocations = RankWeightedAllocator::new()
            .allocate(&buy_list(&["AAPL", "MSFT", "NVDA"]), dec!(1000))
            .unwrap();

        let weights: Vec<u32> = allocations.iter().map(|a| a.weight).collect();
        assert_eq!(weights, vec![3, 2, 1]);

        let rounded: Vec<Decimal> = allocations.iter().map(|a| a.dollar_amount.round_dp(2)).collect();
        assert_eq!(rounded, vec![dec!(500.00), dec!(333.33), dec!(166.67)]);

        let tickers: Vec<_> = allocations.iter().map(|a| a.ticker.as_deref().unwrap()).collect();
        assert_eq!(tickers, vec!["AAPL", "MSFT", "NVDA"]);
    }

    #[test]
    fn test_allocations_sum_to_amount() {
        let amounts = [dec!(1000), dec!(0.01), dec!(12345.678), dec!(7), dec!(999999.99)];
        for n in 1..=25 {
            let tickers: Vec<String> = (0..n).map(|i| format!("T{}", i)).collect();
            let refs: Vec<&str> = tickers.iter().map(String::as_str).collect();
            for amount in amounts {
                let allocations = RankWeightedAllocator::new().allocate(&buy_list(&refs), amount).unwrap();
                let total: Decimal = allocations.iter().map(|a| a.dollar_amount).sum();
                let tolerance = amount * dec!(0.000001);
                assert!((total - amount).abs() <= tolerance, "n={} amount={} total={}", n, amount, total);
            }
        }
    }

    #[test]
    fn test_weights_never_increase_with_rank() {
        for n in 1..=50 {
            let weights = rank_weights(n).unwrap();
            assert_eq!(weights[0] as usize, n);
            assert_eq!(*weights.last().unwrap(), 1);
            assert!(weights.windows(2).all(|w| w[0] >= w[1]));
        }
    }

    #[test]
    fn test_single_recommendation_gets_everything() {
        let allocations = RankWeightedAllocator::new()
            .allocate(&buy_list(&["AMZN"]), dec!(250))
            .unwrap();
        assert_eq!(allocations.len(), 1);
        assert_eq!(allocations[0].dollar_amount, dec!(250));
    }

    #[test]
    fn test_empty_buy_list_is_not_an_error() {
        let allocations = RankWeightedAllocator::new().allocate(&[], dec!(1000)).unwrap();
        assert!(allocations.is_empty());
    }

    #[test]
    fn test_missing_ticker_still_consumes_its_share() {
        let mut list = buy_list(&["AAPL", "MSFT"]);
        list.insert(1, Recommendation::new("Private Co", None, "hype"));
        let allocations = RankWeightedAllocator::new().allocate(&list, dec!(600)).unwrap();
        assert_eq!(allocations[1].ticker, None);
        assert_eq!(allocations[1].dollar_amount, dec!(200));
    }

    #[test]
    fn test_rejects_non_positive_amount() {
        let err = RankWeightedAllocator::new()
            .allocate(&buy_list(&["AAPL"]), Decimal::ZERO)
            .unwrap_err();
        assert!(matches!(err, AllocationError::InvalidAmount(_)));
    }
}
