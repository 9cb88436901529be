pub mod mission_reward;
