mod category;
mod product;
mod user;

pub use category::{Category, NewCategory, UpdateCategory};
pub use product::{NewProduct, Product, ProductDetails, UpdateProduct};
pub use user::{Favorite, NewUser, UpdateUser, User, UserDetails};
