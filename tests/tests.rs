mod cli;
mod harness;
mod webservice;
