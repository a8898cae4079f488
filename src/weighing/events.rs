use bevy::prelude::*;

/// 把第 index 个袋子拖到秤上
#[derive(Event)]
pub struct PlaceBag {
    pub index: usize,
}

/// 从秤上拿下来
#[derive(Event)]
pub struct LiftBag {
    pub index: usize,
}

/// “Get Barcode”
#[derive(Event)]
pub struct RequestBarcode;
