use bevy::prelude::*;

/// “Eat Pie”：从厨房端到餐桌
#[derive(Event)]
pub struct ServePie;

#[derive(Event)]
pub struct TakeBite;

/// “Play Again”
#[derive(Event)]
pub struct PlayAgain;
