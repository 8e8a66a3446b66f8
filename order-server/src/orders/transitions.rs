//! Status Transition table
//!
//! ```text
//! Pending ──► Confirmed ──► Preparing ──► ReadyForPickup ───────────────► Delivered
//!    │            │             └───────► ReadyForDelivery ─► OutForDelivery ─┘
//!    ▼            ▼
//! Rejected    Cancelled
//! ```
//!
//! Rejected, Cancelled and Delivered are terminal. Side effects of a
//! transition are applied by `OrdersManager`.

use super::error::OrderError;
use shared::order::OrderStatus;

/// Legal targets per source status
pub const fn allowed_targets(from: OrderStatus) -> &'static [OrderStatus] {
    use OrderStatus::*;
    match from {
        Pending => &[Confirmed, Rejected],
        Confirmed => &[Preparing, Cancelled],
        Preparing => &[ReadyForPickup, ReadyForDelivery],
        ReadyForPickup => &[Delivered],
        ReadyForDelivery => &[OutForDelivery],
        OutForDelivery => &[Delivered],
        Rejected | Cancelled | Delivered => &[],
    }
}

pub fn is_legal(from: OrderStatus, to: OrderStatus) -> bool {
    allowed_targets(from).contains(&to)
}

pub fn check(from: OrderStatus, to: OrderStatus) -> Result<(), OrderError> {
    if is_legal(from, to) {
        Ok(())
    } else {
        Err(OrderError::InvalidStatusTransition { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;

    const LEGAL: [(OrderStatus, OrderStatus); 9] = [
        (Pending, Confirmed),
        (Pending, Rejected),
        (Confirmed, Preparing),
        (Confirmed, Cancelled),
        (Preparing, ReadyForPickup),
        (Preparing, ReadyForDelivery),
        (ReadyForPickup, Delivered),
        (ReadyForDelivery, OutForDelivery),
        (OutForDelivery, Delivered),
    ];

    #[test]
    fn test_table_is_exhaustive() {
        let mut legal_count = 0;
        for from in OrderStatus::ALL {
            for to in OrderStatus::ALL {
                let expected = LEGAL.contains(&(from, to));
                assert_eq!(is_legal(from, to), expected, "{from} -> {to}");
                match check(from, to) {
                    Ok(()) => legal_count += 1,
                    Err(err) => assert_eq!(err, OrderError::InvalidStatusTransition { from, to }),
                }
            }
        }
        assert_eq!(legal_count, 9);
    }

    #[test]
    fn test_terminal_statuses_have_no_targets() {
        for status in OrderStatus::ALL {
            assert_eq!(allowed_targets(status).is_empty(), status.is_terminal());
        }
    }

    #[test]
    fn test_no_self_transitions() {
        for status in OrderStatus::ALL {
            assert!(!is_legal(status, status));
        }
    }
}
