pub(crate) mod common;


#[cfg(test)]
mod test_stockpile;

#[cfg(test)]
mod test_swallow;

#[cfg(test)]
mod test_protect;
