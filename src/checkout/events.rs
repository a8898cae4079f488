use bevy::prelude::*;

/// 把扫码枪拖到条码上
#[derive(Event)]
pub struct ScanBarcode;

/// “Proceed to Checkout”
#[derive(Event)]
pub struct ProceedToCheckout;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Cash,
    Card,
}

#[derive(Event)]
pub struct ChoosePayment(pub PaymentMethod);

#[derive(Event)]
pub struct OpenWallet;

/// 把第 index 张钞票投进收款箱
#[derive(Event)]
pub struct InsertBill {
    pub index: usize,
}

/// 刷卡
#[derive(Event)]
pub struct TapCard;
