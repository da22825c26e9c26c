pub mod card;
pub mod deck;
pub mod decision;
pub mod hand;
pub mod player;
pub mod score;
pub mod shoe;
