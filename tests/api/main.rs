mod helpers;
mod root;
