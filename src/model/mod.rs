pub mod owned_game;
