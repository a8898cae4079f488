use bevy::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::core::error::GameError;

/// 总价 = 重量 × 每磅单价
pub fn price_for(weight: f32, rate: f32) -> Result<f32, GameError> {
    if !weight.is_finite() || weight < 0.0 {
        return Err(GameError::invalid(format!("weight must be a non-negative number, got {weight}")));
    }
    Ok(weight * rate)
}

/// 扫码得到的小票，打印成一行 JSON
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Receipt {
    pub session: String,
    pub player: String,
    pub barcode: String,
    pub weight_lb: f32,
    pub rate_per_lb: f32,
    pub price: f32,
}

impl Receipt {
    pub fn new(session: Uuid, player: &str, weight: f32, rate: f32) -> Result<Self, GameError> {
        let price = price_for(weight, rate)?;
        // 同一会话同一重量得到同一条码
        let payload = format!("{weight:.4}@{rate:.2}");
        let barcode = Uuid::new_v5(&session, payload.as_bytes());
        Ok(Self {
            session: session.to_string(),
            player: player.to_string(),
            barcode: barcode.simple().to_string(),
            weight_lb: weight,
            rate_per_lb: rate,
            price,
        })
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
    }
}

/// 收银台：扫码状态与付款进度
#[derive(Resource, Debug, Clone, Default)]
pub struct Till {
    pub receipt: Option<Receipt>,
    pub payment: Option<Payment>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payment {
    Card { approved: bool },
    Cash(CashDrawer),
}

impl Payment {
    pub fn is_complete(&self) -> bool {
        match self {
            Payment::Card { approved } => *approved,
            Payment::Cash(drawer) => drawer.is_paid(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bill {
    pub value: u32,
    pub used: bool,
}

/// 现金付款：钱包打开后生成钞票，逐张投入
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CashDrawer {
    pub price: f32,
    /// None 表示钱包还没打开
    pub bills: Option<Vec<Bill>>,
    pub paid: u32,
}

impl CashDrawer {
    pub fn new(price: f32) -> Self {
        Self {
            price,
            bills: None,
            paid: 0,
        }
    }

    /// 打开钱包；重复打开无效果，返回是否是第一次
    pub fn open_wallet(&mut self) -> bool {
        if self.bills.is_some() {
            return false;
        }
        let bills = wallet_bills(self.price)
            .into_iter()
            .map(|value| Bill { value, used: false })
            .collect();
        self.bills = Some(bills);
        true
    }

    /// 投入一张钞票，返回面额
    pub fn insert(&mut self, index: usize) -> Result<u32, GameError> {
        let Some(bills) = self.bills.as_mut() else {
            return Err(GameError::invalid("open the wallet first"));
        };
        let count = bills.len();
        let bill = bills
            .get_mut(index)
            .ok_or_else(|| GameError::invalid(format!("no bill #{index} ({count} bills in the wallet)")))?;
        if bill.used {
            return Err(GameError::invalid(format!("bill #{index} was already paid in")));
        }
        bill.used = true;
        self.paid += bill.value;
        Ok(bill.value)
    }

    pub fn remaining(&self) -> f32 {
        (self.price - self.paid as f32).max(0.0)
    }

    pub fn is_paid(&self) -> bool {
        self.paid as f32 >= self.price
    }

    pub fn change(&self) -> f32 {
        (self.paid as f32 - self.price).max(0.0)
    }
}

/// 按 20/10/5/1 贪心凑够向上取整的金额，再额外多给 5、1、1
pub fn wallet_bills(price: f32) -> Vec<u32> {
    let mut remaining = price.max(0.0).ceil() as u32;
    let mut bills = Vec::new();
    while remaining > 0 {
        let value = match remaining {
            20.. => 20,
            10.. => 10,
            5.. => 5,
            _ => 1,
        };
        bills.push(value);
        remaining -= value;
    }
    bills.extend([5, 1, 1]);
    bills
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_matches_reference_scenarios() {
        assert_eq!(price_for(1.0, 5.0).unwrap(), 5.0);
        assert_eq!(price_for(1.5, 5.0).unwrap(), 7.5);
        assert_eq!(price_for(0.0, 5.0).unwrap(), 0.0);
    }

    #[test]
    fn price_is_linear_in_weight() {
        for w in [0.0f32, 0.25, 0.5, 1.5, 3.75, 12.0] {
            assert_eq!(price_for(2.0 * w, 5.0).unwrap(), 2.0 * price_for(w, 5.0).unwrap());
        }
    }

    #[test]
    fn negative_or_nan_weight_is_rejected() {
        assert!(matches!(price_for(-0.1, 5.0), Err(GameError::InvalidArgument(_))));
        assert!(price_for(f32::NAN, 5.0).is_err());
    }

    #[test]
    fn wallet_holds_greedy_bills_plus_extras() {
        assert_eq!(wallet_bills(7.5), vec![5, 1, 1, 1, 5, 1, 1]);
        assert_eq!(wallet_bills(36.0), vec![20, 10, 5, 1, 5, 1, 1]);
        assert_eq!(wallet_bills(0.0), vec![5, 1, 1]);
    }

    #[test]
    fn cash_payment_tracks_remaining_and_change() {
        let mut drawer = CashDrawer::new(7.5);
        assert!(drawer.insert(0).is_err());
        assert!(drawer.open_wallet());
        assert!(!drawer.open_wallet());

        assert_eq!(drawer.insert(0).unwrap(), 5);
        assert_eq!(drawer.remaining(), 2.5);
        assert!(!drawer.is_paid());
        assert!(drawer.insert(0).is_err());

        // 再投一张 5 元（下标 4）就够了
        assert_eq!(drawer.insert(4).unwrap(), 5);
        assert!(drawer.is_paid());
        assert_eq!(drawer.remaining(), 0.0);
        assert_eq!(drawer.change(), 2.5);
        assert!(Payment::Cash(drawer).is_complete());
    }

    #[test]
    fn receipt_is_stable_for_the_same_session_and_weight() {
        let session = Uuid::new_v5(&Uuid::NAMESPACE_OID, b"Ann#1");
        let a = Receipt::new(session, "Ann", 1.5, 5.0).unwrap();
        let b = Receipt::new(session, "Ann", 1.5, 5.0).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.price, 7.5);

        let json: serde_json::Value = serde_json::from_str(&a.to_json()).unwrap();
        assert_eq!(json["player"], "Ann");
        assert_eq!(json["price"], 7.5);
    }
}
