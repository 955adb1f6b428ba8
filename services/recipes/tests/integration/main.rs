
mod comment_test;
mod forum_test;
mod rating_test;
mod recipe_test;
mod router_test;
