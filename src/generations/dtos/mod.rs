pub mod create_generation_dto;
