pub mod entity;

pub use entity::{
    image_url, ImageDescriptor, MovieImageSet, MovieVideoSet, VideoDescriptor,
};
