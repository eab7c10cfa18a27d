pub mod picture_transform;
