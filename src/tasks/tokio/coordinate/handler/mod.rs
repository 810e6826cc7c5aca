mod output;
mod result;
mod timeout;
